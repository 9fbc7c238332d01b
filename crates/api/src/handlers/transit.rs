//! Handlers for the `/transit` resource: the hostel gate log.

use axum::extract::{Query, State};
use axum::response::Response;
use hostelia_core::pagination::{Paginated, Pagination};
use hostelia_core::roles::Role;
use hostelia_core::transit::{validate_purpose, validate_sequence};
use hostelia_db::models::transit::{CreateTransit, CreateTransitRequest, TransitEntry};
use hostelia_db::repositories::TransitRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::list_scope;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStudent;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TransitParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub hostel: Option<String>,
}

/// GET /api/v1/transit
///
/// Students see their own entries; staff see their hostel's.
pub async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<TransitParams>,
) -> AppResult<ApiResponse<Paginated<TransitEntry>>> {
    let viewer = auth.viewer();
    let (student_id, hostel) = match viewer.role {
        Role::Student => (Some(viewer.user_id), None),
        Role::Warden | Role::Admin => (None, list_scope(&viewer, params.hostel.as_deref())?),
    };

    let total = TransitRepo::count(&state.pool, student_id, hostel.as_deref()).await?;
    let pagination = Pagination::from_request(params.page, params.limit, total);
    let items = TransitRepo::list(
        &state.pool,
        student_id,
        hostel.as_deref(),
        pagination.limit,
        pagination.offset(),
    )
    .await?;
    Ok(ApiResponse::ok(Paginated::new(items, &pagination)))
}

/// POST /api/v1/transit
pub async fn create_entry(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
    ValidatedJson(input): ValidatedJson<CreateTransitRequest>,
) -> AppResult<Response> {
    validate_purpose(&input.purpose)?;
    let hostel = student.viewer().hostel_scope()?.unwrap_or_default().to_string();

    let last = TransitRepo::last_direction(&state.pool, student.user_id).await?;
    validate_sequence(last, input.direction)?;

    let entry = TransitRepo::create(
        &state.pool,
        &CreateTransit {
            student_id: student.user_id,
            hostel,
            direction: input.direction,
            purpose: input.purpose,
        },
    )
    .await?;

    tracing::info!(
        transit_id = entry.id,
        user_id = student.user_id,
        direction = %entry.direction,
        "Transit logged"
    );
    Ok(ApiResponse::with_message(entry, "Transit logged").created())
}
