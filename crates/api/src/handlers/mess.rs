//! Handlers for the `/mess` resource: weekly menus and meal feedback.

use axum::extract::{Query, State};
use axum::response::Response;
use hostelia_core::dashboard::{summarize_feedback, FeedbackSummary};
use hostelia_core::mess::{normalize_menu_items, validate_rating};
use hostelia_core::pagination::{Paginated, Pagination};
use hostelia_core::roles::{Role, Viewer};
use hostelia_db::models::mess::{
    CreateFeedback, CreateFeedbackRequest, MessFeedback, MessMenuEntry, UpsertMenuRequest,
};
use hostelia_db::repositories::MessRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::list_scope;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireStaff, RequireStudent};
use crate::query::HostelParams;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub hostel: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMenu {
    pub hostel: String,
    pub entries: Vec<MessMenuEntry>,
}

/// A page of feedback plus the aggregate over everything in scope.
#[derive(Debug, Serialize)]
pub struct FeedbackPage {
    #[serde(flatten)]
    pub page: Paginated<MessFeedback>,
    pub summary: FeedbackSummary,
}

/// The hostel whose menu `viewer` reads. Admins must name one.
fn menu_hostel(viewer: &Viewer, requested: Option<&str>) -> AppResult<String> {
    let requested = requested.map(str::trim).filter(|h| !h.is_empty());
    match viewer.role {
        Role::Admin => Ok(viewer.resolve_managed_hostel(requested)?),
        Role::Student | Role::Warden => Ok(list_scope(viewer, requested)?.unwrap_or_default()),
    }
}

/// GET /api/v1/mess/menu
pub async fn get_menu(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HostelParams>,
) -> AppResult<ApiResponse<WeeklyMenu>> {
    let hostel = menu_hostel(&auth.viewer(), params.hostel.as_deref())?;
    let entries = MessRepo::menu_for_hostel(&state.pool, &hostel).await?;
    Ok(ApiResponse::ok(WeeklyMenu { hostel, entries }))
}

/// PUT /api/v1/mess/menu
pub async fn upsert_menu(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    ValidatedJson(input): ValidatedJson<UpsertMenuRequest>,
) -> AppResult<ApiResponse<MessMenuEntry>> {
    let requested = input.hostel.as_deref().map(str::trim).filter(|h| !h.is_empty());
    let hostel = staff.viewer().resolve_managed_hostel(requested)?;
    let items = normalize_menu_items(&input.items)?;

    let entry = MessRepo::upsert_menu(&state.pool, &hostel, input.day, input.meal, &items).await?;
    tracing::info!(
        user_id = staff.user_id,
        hostel = %hostel,
        day = %input.day,
        meal = %input.meal,
        "Mess menu updated"
    );
    Ok(ApiResponse::with_message(entry, "Menu updated"))
}

/// POST /api/v1/mess/feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
    ValidatedJson(input): ValidatedJson<CreateFeedbackRequest>,
) -> AppResult<Response> {
    validate_rating(input.rating)?;
    let hostel = student.viewer().hostel_scope()?.unwrap_or_default().to_string();

    let feedback = MessRepo::create_feedback(
        &state.pool,
        &CreateFeedback {
            student_id: student.user_id,
            hostel,
            meal: input.meal,
            rating: input.rating,
            comment: input.comment,
        },
    )
    .await?;

    tracing::info!(
        feedback_id = feedback.id,
        user_id = student.user_id,
        meal = %feedback.meal,
        rating = feedback.rating,
        "Mess feedback submitted"
    );
    Ok(ApiResponse::with_message(feedback, "Thanks for your feedback").created())
}

/// GET /api/v1/mess/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Query(params): Query<FeedbackParams>,
) -> AppResult<ApiResponse<FeedbackPage>> {
    let hostel = list_scope(&staff.viewer(), params.hostel.as_deref())?;

    let total = MessRepo::count_feedback(&state.pool, hostel.as_deref()).await?;
    let pagination = Pagination::from_request(params.page, params.limit, total);
    let items = MessRepo::list_feedback(
        &state.pool,
        hostel.as_deref(),
        pagination.limit,
        pagination.offset(),
    )
    .await?;
    let samples = MessRepo::rating_samples(&state.pool, hostel.as_deref()).await?;

    Ok(ApiResponse::ok(FeedbackPage {
        page: Paginated::new(items, &pagination),
        summary: summarize_feedback(samples),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::error::AppError;
    use hostelia_core::error::CoreError;

    #[test]
    fn students_read_their_own_menu() {
        let student = Viewer::new(5, Role::Student, Some("BH-1".into()));
        assert_eq!(menu_hostel(&student, None).unwrap(), "BH-1");
    }

    #[test]
    fn admins_must_name_a_hostel() {
        let admin = Viewer::new(1, Role::Admin, None);
        assert_matches!(
            menu_hostel(&admin, None),
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_eq!(menu_hostel(&admin, Some("GH-1")).unwrap(), "GH-1");
    }
}
