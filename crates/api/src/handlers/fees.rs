//! Handlers for the `/fee` resource: document submission and review.

use axum::extract::{Path, Query, State};
use chrono::Utc;
use hostelia_core::dashboard::summarize_fees;
use hostelia_core::fee::{FeeOverview, FeeStatus, FeeSubmission, FeeType, StudentFeeStatus};
use hostelia_core::pagination::{Paginated, Pagination};
use hostelia_core::roles::{Role, Viewer};
use hostelia_core::timeline::{fee_timelines, FeeTimelines};
use hostelia_core::types::DbId;
use hostelia_db::models::fee::{RejectFeeRequest, StudentFeeRecord, SubmitFeeRequest};
use hostelia_db::models::user::User;
use hostelia_db::repositories::{FeeRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::handlers::list_scope;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireStaff, RequireStudent};
use crate::response::ApiResponse;
use crate::state::AppState;

/// `GET /fee/students` query: scope, page and an optional status filter
/// applied to either fee type.
#[derive(Debug, Default, Deserialize)]
pub struct StudentFeeParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub hostel: Option<String>,
    pub status: Option<String>,
}

fn parse_fee_type(raw: &str) -> AppResult<FeeType> {
    Ok(raw.parse::<FeeType>()?)
}

/// Load a student account that `viewer` may see.
async fn load_student(state: &AppState, viewer: &Viewer, id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|u| u.role == Role::Student)
        .ok_or_else(|| AppError::not_found("Student", id))?;
    let hostel = user.hostel.as_deref().unwrap_or_default();
    if !viewer.can_view_student(user.id, hostel) {
        return Err(AppError::forbidden("You may not view this student's fees"));
    }
    Ok(user)
}

fn record(user: User, fees: StudentFeeStatus) -> StudentFeeRecord {
    StudentFeeRecord {
        student_id: user.id,
        name: user.name,
        email: user.email,
        hostel: user.hostel,
        room_no: user.room_no,
        fees,
    }
}

/// Write `next` over a row last seen in `expected` status.
async fn store(
    state: &AppState,
    student_id: DbId,
    fee_type: FeeType,
    expected: FeeStatus,
    next: &FeeSubmission,
) -> AppResult<StudentFeeStatus> {
    FeeRepo::ensure_rows(&state.pool, student_id).await?;
    FeeRepo::transition(&state.pool, student_id, fee_type, expected, next)
        .await?
        .ok_or_else(|| {
            AppError::conflict("Fee submission was updated by someone else; reload and try again")
        })?;
    Ok(FeeRepo::find_for_student(&state.pool, student_id).await?)
}

/// GET /api/v1/fee
///
/// Students get their own submissions; staff get counts over the students
/// in scope.
pub async fn overview(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<ApiResponse<FeeOverview>> {
    let viewer = auth.viewer();
    let overview = match viewer.role {
        Role::Student => {
            FeeOverview::Student(FeeRepo::find_for_student(&state.pool, viewer.user_id).await?)
        }
        Role::Warden | Role::Admin => {
            let hostel = list_scope(&viewer, None)?;
            let records = FeeRepo::list_student_fees(&state.pool, hostel.as_deref()).await?;
            FeeOverview::Summary(summarize_fees(records.iter().map(|r| &r.fees)))
        }
    };
    Ok(ApiResponse::ok(overview))
}

/// POST /api/v1/fee/{fee_type}
pub async fn submit(
    State(state): State<AppState>,
    RequireStudent(student): RequireStudent,
    Path(fee_type): Path<String>,
    ValidatedJson(input): ValidatedJson<SubmitFeeRequest>,
) -> AppResult<ApiResponse<StudentFeeStatus>> {
    let fee_type = parse_fee_type(&fee_type)?;
    let current = FeeRepo::find_for_student(&state.pool, student.user_id).await?;
    let before = current.get(fee_type);
    let next = before.submit(input.document_url.trim(), Utc::now())?;

    let fees = store(&state, student.user_id, fee_type, before.status, &next).await?;
    tracing::info!(
        user_id = student.user_id,
        fee_type = %fee_type,
        "Fee document submitted"
    );
    Ok(ApiResponse::with_message(fees, "Document submitted for review"))
}

/// GET /api/v1/fee/students
pub async fn list_students(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Query(params): Query<StudentFeeParams>,
) -> AppResult<ApiResponse<Paginated<StudentFeeRecord>>> {
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<FeeStatus>)
        .transpose()?;
    let hostel = list_scope(&staff.viewer(), params.hostel.as_deref())?;

    let mut records = FeeRepo::list_student_fees(&state.pool, hostel.as_deref()).await?;
    if let Some(status) = status {
        records.retain(|r| r.fees.hostel_fee.status == status || r.fees.mess_fee.status == status);
    }

    let pagination = Pagination::from_request(
        params.page,
        params.limit,
        records.len() as i64,
    );
    let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
    let page: Vec<StudentFeeRecord> = records
        .into_iter()
        .skip(skip)
        .take(pagination.limit as usize)
        .collect();
    Ok(ApiResponse::ok(Paginated::new(page, &pagination)))
}

/// GET /api/v1/fee/students/{id}
pub async fn student_fees(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<StudentFeeRecord>> {
    let user = load_student(&state, &staff.viewer(), id).await?;
    let fees = FeeRepo::find_for_student(&state.pool, id).await?;
    Ok(ApiResponse::ok(record(user, fees)))
}

/// GET /api/v1/fee/students/{id}/timeline
pub async fn student_timeline(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<FeeTimelines>> {
    load_student(&state, &auth.viewer(), id).await?;
    let fees = FeeRepo::find_for_student(&state.pool, id).await?;
    Ok(ApiResponse::ok(fee_timelines(&fees)))
}

/// Load, check hostel scope, and return the current submission.
async fn reviewable(
    state: &AppState,
    viewer: &Viewer,
    id: DbId,
    fee_type: FeeType,
) -> AppResult<(User, FeeSubmission)> {
    let user = load_student(state, viewer, id).await?;
    if !viewer.can_manage_hostel(user.hostel.as_deref().unwrap_or_default()) {
        return Err(AppError::forbidden("You may not review this student's fees"));
    }
    let fees = FeeRepo::find_for_student(&state.pool, id).await?;
    Ok((user, fees.get(fee_type).clone()))
}

/// POST /api/v1/fee/students/{id}/{fee_type}/approve
pub async fn approve(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path((id, fee_type)): Path<(DbId, String)>,
) -> AppResult<ApiResponse<StudentFeeRecord>> {
    let fee_type = parse_fee_type(&fee_type)?;
    let (user, current) = reviewable(&state, &staff.viewer(), id, fee_type).await?;
    let next = current.approve(Utc::now())?;

    let fees = store(&state, id, fee_type, current.status, &next).await?;
    tracing::info!(
        student_id = id,
        fee_type = %fee_type,
        reviewed_by = staff.user_id,
        "Fee approved"
    );
    Ok(ApiResponse::with_message(record(user, fees), "Fee approved"))
}

/// POST /api/v1/fee/students/{id}/{fee_type}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path((id, fee_type)): Path<(DbId, String)>,
    ValidatedJson(input): ValidatedJson<RejectFeeRequest>,
) -> AppResult<ApiResponse<StudentFeeRecord>> {
    let fee_type = parse_fee_type(&fee_type)?;
    let (user, current) = reviewable(&state, &staff.viewer(), id, fee_type).await?;
    let next = current.reject(&input.reason, Utc::now())?;

    let fees = store(&state, id, fee_type, current.status, &next).await?;
    tracing::info!(
        student_id = id,
        fee_type = %fee_type,
        reviewed_by = staff.user_id,
        "Fee rejected"
    );
    Ok(ApiResponse::with_message(record(user, fees), "Fee rejected"))
}
