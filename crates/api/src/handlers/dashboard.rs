//! Handler for `GET /dashboard`: one role-specific summary per request.

use axum::extract::{Query, State};
use hostelia_core::dashboard::{
    format_resolution_time, summarize_complaints, summarize_feedback, summarize_fees,
    ComplaintSummary, FeedbackSummary,
};
use hostelia_core::fee::{FeeSummary, StudentFeeStatus};
use hostelia_core::listing::ListFilter;
use hostelia_core::roles::{Role, Viewer};
use hostelia_core::transit::is_outside;
use hostelia_db::models::announcement::Announcement;
use hostelia_db::repositories::{
    AnnouncementRepo, ComplaintRepo, FeeRepo, MessRepo, TransitRepo, UserRepo,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::announcements::visible_hostel;
use crate::handlers::complaints::complaint_scope;
use crate::handlers::list_scope;
use crate::middleware::auth::AuthUser;
use crate::query::HostelParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Announcements shown on a dashboard.
const RECENT_ANNOUNCEMENTS: i64 = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub complaints: ComplaintSummary,
    pub fees: StudentFeeStatus,
    pub announcements: Vec<Announcement>,
    /// Whether the student's last gate entry was an exit.
    pub is_outside: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDashboard {
    /// `None` when an admin views every hostel.
    pub hostel: Option<String>,
    pub total_students: i64,
    pub students_outside: i64,
    pub complaints: ComplaintSummary,
    /// e.g. `"5.3 hrs"`, `"2.1 days"` or `"N/A"`.
    pub average_resolution_time: String,
    pub fees: FeeSummary,
    pub feedback: FeedbackSummary,
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dashboard {
    Student(StudentDashboard),
    Staff(StaffDashboard),
}

async fn student_dashboard(state: &AppState, viewer: &Viewer) -> AppResult<StudentDashboard> {
    let scope = complaint_scope(viewer, None)?;
    let complaints = ComplaintRepo::list_all(&state.pool, &scope).await?;
    let progress: Vec<_> = complaints.iter().map(|c| c.progress()).collect();
    let fees = FeeRepo::find_for_student(&state.pool, viewer.user_id).await?;
    let hostel = visible_hostel(viewer)?;
    let announcements =
        AnnouncementRepo::list_visible(&state.pool, hostel.as_deref(), RECENT_ANNOUNCEMENTS, 0)
            .await?;
    let last = TransitRepo::last_direction(&state.pool, viewer.user_id).await?;

    Ok(StudentDashboard {
        complaints: summarize_complaints(&progress),
        fees,
        announcements,
        is_outside: is_outside(last),
    })
}

async fn staff_dashboard(
    state: &AppState,
    viewer: &Viewer,
    requested: Option<&str>,
) -> AppResult<StaffDashboard> {
    let hostel = list_scope(viewer, requested)?;
    let hostel_ref = hostel.as_deref();

    let complaints =
        ComplaintRepo::list_all(&state.pool, &complaint_scope(viewer, hostel_ref)?).await?;
    let progress: Vec<_> = complaints.iter().map(|c| c.progress()).collect();
    let complaint_summary = summarize_complaints(&progress);

    let fee_records = FeeRepo::list_student_fees(&state.pool, hostel_ref).await?;
    let student_filter = ListFilter {
        hostel: hostel.clone(),
        ..Default::default()
    };

    Ok(StaffDashboard {
        total_students: UserRepo::count_students(&state.pool, &student_filter).await?,
        students_outside: TransitRepo::count_outside(&state.pool, hostel_ref).await?,
        average_resolution_time: format_resolution_time(
            complaint_summary.average_resolution_hours,
        ),
        complaints: complaint_summary,
        fees: summarize_fees(fee_records.iter().map(|r| &r.fees)),
        feedback: summarize_feedback(MessRepo::rating_samples(&state.pool, hostel_ref).await?),
        announcements: AnnouncementRepo::list_visible(
            &state.pool,
            hostel_ref,
            RECENT_ANNOUNCEMENTS,
            0,
        )
        .await?,
        hostel,
    })
}

/// GET /api/v1/dashboard
///
/// Admins may narrow the staff view with `?hostel=`.
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HostelParams>,
) -> AppResult<ApiResponse<Dashboard>> {
    let viewer = auth.viewer();
    let dashboard = match viewer.role {
        Role::Student => Dashboard::Student(student_dashboard(&state, &viewer).await?),
        Role::Warden | Role::Admin => Dashboard::Staff(
            staff_dashboard(&state, &viewer, params.hostel.as_deref()).await?,
        ),
    };
    Ok(ApiResponse::ok(dashboard))
}
