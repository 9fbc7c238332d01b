//! Handlers for the `/complaints` resource.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use chrono::Utc;
use hostelia_core::complaint::{ComplaintAction, ComplaintCategory, ComplaintStatus};
use hostelia_core::media;
use hostelia_core::pagination::Paginated;
use hostelia_core::roles::{Role, Viewer};
use hostelia_core::timeline::{complaint_timeline, TimelineStage};
use hostelia_core::types::DbId;
use hostelia_db::models::complaint::{Complaint, CreateComplaint, CreateComplaintRequest};
use hostelia_db::repositories::{ComplaintRepo, ComplaintScope, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::list_scope;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireStaff, RequireStudent};
use crate::query::ListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintTimeline {
    pub complaint_id: DbId,
    pub status: ComplaintStatus,
    pub stages: Vec<TimelineStage>,
}

/// The complaints `viewer` may list.
pub(crate) fn complaint_scope(viewer: &Viewer, requested_hostel: Option<&str>) -> AppResult<ComplaintScope> {
    match viewer.role {
        Role::Student => Ok(ComplaintScope {
            student_id: Some(viewer.user_id),
            hostel: None,
        }),
        Role::Warden | Role::Admin => Ok(ComplaintScope {
            student_id: None,
            hostel: list_scope(viewer, requested_hostel)?,
        }),
    }
}

async fn load_visible(state: &AppState, viewer: &Viewer, id: DbId) -> AppResult<Complaint> {
    let complaint = ComplaintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Complaint", id))?;
    if !viewer.can_view_student(complaint.student_id, &complaint.hostel) {
        return Err(AppError::forbidden("You may not view this complaint"));
    }
    Ok(complaint)
}

/// POST /api/v1/complaints
///
/// Hostel and room are taken from the student's account.
pub async fn create_complaint(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
    ValidatedJson(input): ValidatedJson<CreateComplaintRequest>,
) -> AppResult<Response> {
    let image_url = input
        .image_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    if let Some(url) = &image_url {
        media::validate_image_url(url)?;
    }

    let account = UserRepo::find_by_id(&state.pool, student.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", student.user_id))?;
    let (hostel, room_no) = match (account.hostel, account.room_no) {
        (Some(h), Some(r)) => (h, r),
        _ => {
            return Err(AppError::validation(
                "Your account has no hostel room assigned",
            ))
        }
    };

    let complaint = ComplaintRepo::create(
        &state.pool,
        &CreateComplaint {
            student_id: student.user_id,
            title: input.title,
            description: input.description,
            category: input.category,
            hostel,
            room_no,
            image_url,
        },
    )
    .await?;

    tracing::info!(
        complaint_id = complaint.id,
        user_id = student.user_id,
        category = %complaint.category,
        "Complaint registered"
    );

    Ok(ApiResponse::with_message(complaint, "Complaint registered").created())
}

/// GET /api/v1/complaints
pub async fn list_complaints(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Paginated<Complaint>>> {
    let filter = params.filter();
    if let Some(status) = &filter.status {
        status.parse::<ComplaintStatus>()?;
    }
    if let Some(category) = &filter.category {
        category.parse::<ComplaintCategory>()?;
    }
    let scope = complaint_scope(&auth.viewer(), filter.hostel.as_deref())?;

    let total = ComplaintRepo::count(&state.pool, &scope, &filter).await?;
    let pagination = params.pagination(total);
    let items = ComplaintRepo::list(
        &state.pool,
        &scope,
        &filter,
        pagination.limit,
        pagination.offset(),
    )
    .await?;

    Ok(ApiResponse::ok(Paginated::new(items, &pagination)))
}

/// GET /api/v1/complaints/{id}
pub async fn get_complaint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Complaint>> {
    let complaint = load_visible(&state, &auth.viewer(), id).await?;
    Ok(ApiResponse::ok(complaint))
}

/// GET /api/v1/complaints/{id}/timeline
pub async fn get_timeline(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<ComplaintTimeline>> {
    let complaint = load_visible(&state, &auth.viewer(), id).await?;
    Ok(ApiResponse::ok(ComplaintTimeline {
        complaint_id: complaint.id,
        status: complaint.status,
        stages: complaint_timeline(&complaint.progress()),
    }))
}

/// Apply `action` on behalf of `viewer`.
///
/// Staff actions need the complaint's hostel in scope; student actions need
/// ownership. The write only lands if nobody changed the status since it
/// was read.
async fn transition(
    state: &AppState,
    viewer: &Viewer,
    id: DbId,
    action: ComplaintAction,
) -> AppResult<Complaint> {
    let complaint = ComplaintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Complaint", id))?;

    let allowed = if action.is_staff_action() {
        viewer.can_manage_hostel(&complaint.hostel)
    } else {
        viewer.user_id == complaint.student_id
    };
    if !allowed {
        return Err(AppError::forbidden("You may not update this complaint"));
    }

    let next = complaint.progress().apply(action, Utc::now())?;
    let updated = ComplaintRepo::transition(&state.pool, id, complaint.status, &next)
        .await?
        .ok_or_else(|| {
            AppError::conflict("Complaint was updated by someone else; reload and try again")
        })?;

    tracing::info!(
        complaint_id = id,
        user_id = viewer.user_id,
        action = action.name(),
        status = %updated.status,
        "Complaint status changed"
    );
    Ok(updated)
}

/// POST /api/v1/complaints/{id}/resolve
pub async fn mark_resolved(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Complaint>> {
    let c = transition(&state, &staff.viewer(), id, ComplaintAction::MarkResolved).await?;
    Ok(ApiResponse::with_message(c, "Complaint marked as resolved; awaiting student confirmation"))
}

/// POST /api/v1/complaints/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Complaint>> {
    let c = transition(&state, &staff.viewer(), id, ComplaintAction::Reject).await?;
    Ok(ApiResponse::with_message(c, "Complaint rejected"))
}

/// POST /api/v1/complaints/{id}/confirm
pub async fn confirm(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Complaint>> {
    let c = transition(&state, &student.viewer(), id, ComplaintAction::StudentConfirm).await?;
    Ok(ApiResponse::with_message(c, "Thanks for confirming the fix"))
}

/// POST /api/v1/complaints/{id}/dispute
pub async fn dispute(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Complaint>> {
    let c = transition(&state, &student.viewer(), id, ComplaintAction::StudentDispute).await?;
    Ok(ApiResponse::with_message(c, "Complaint reopened for review"))
}
