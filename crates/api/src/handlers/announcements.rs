//! Handlers for the `/announcement` resource.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use hostelia_core::pagination::Paginated;
use hostelia_core::roles::{Role, Viewer};
use hostelia_core::types::DbId;
use hostelia_db::models::announcement::{
    Announcement, CreateAnnouncement, CreateAnnouncementRequest,
};
use hostelia_db::repositories::AnnouncementRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// The hostel whose announcements `viewer` reads (own plus global), or
/// `None` for admins, who read all of them.
pub(crate) fn visible_hostel(viewer: &Viewer) -> AppResult<Option<String>> {
    Ok(viewer.hostel_scope()?.map(str::to_string))
}

/// Target hostel for a new announcement. Admins may post globally
/// (`None`); wardens always post to their own hostel.
fn target_hostel(viewer: &Viewer, requested: Option<&str>) -> AppResult<Option<String>> {
    let requested = requested.map(str::trim).filter(|h| !h.is_empty());
    match viewer.role {
        Role::Admin => Ok(requested.map(str::to_string)),
        _ => Ok(Some(viewer.resolve_managed_hostel(requested)?)),
    }
}

/// Whether `viewer` may delete `announcement`.
fn can_delete(viewer: &Viewer, announcement: &Announcement) -> bool {
    match announcement.hostel.as_deref() {
        Some(hostel) => viewer.can_manage_hostel(hostel),
        None => viewer.role == Role::Admin,
    }
}

/// GET /api/v1/announcement
pub async fn list_announcements(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<ApiResponse<Paginated<Announcement>>> {
    let hostel = visible_hostel(&auth.viewer())?;
    let total = AnnouncementRepo::count_visible(&state.pool, hostel.as_deref()).await?;
    let pagination = params.pagination(total);
    let items = AnnouncementRepo::list_visible(
        &state.pool,
        hostel.as_deref(),
        pagination.limit,
        pagination.offset(),
    )
    .await?;
    Ok(ApiResponse::ok(Paginated::new(items, &pagination)))
}

/// POST /api/v1/announcement
pub async fn create_announcement(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    ValidatedJson(input): ValidatedJson<CreateAnnouncementRequest>,
) -> AppResult<Response> {
    let hostel = target_hostel(&staff.viewer(), input.hostel.as_deref())?;
    let announcement = AnnouncementRepo::create(
        &state.pool,
        &CreateAnnouncement {
            title: input.title,
            message: input.message,
            hostel,
            created_by: staff.user_id,
        },
    )
    .await?;

    tracing::info!(
        announcement_id = announcement.id,
        user_id = staff.user_id,
        hostel = announcement.hostel.as_deref().unwrap_or("all"),
        "Announcement posted"
    );
    Ok(ApiResponse::with_message(announcement, "Announcement posted").created())
}

/// DELETE /api/v1/announcement/{id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<()>> {
    let announcement = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Announcement", id))?;
    if !can_delete(&staff.viewer(), &announcement) {
        return Err(AppError::forbidden("You may not delete this announcement"));
    }

    if !AnnouncementRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Announcement", id));
    }
    tracing::info!(announcement_id = id, user_id = staff.user_id, "Announcement deleted");
    Ok(ApiResponse::with_message((), "Announcement deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use hostelia_core::error::CoreError;

    fn announcement(hostel: Option<&str>) -> Announcement {
        Announcement {
            id: 1,
            title: "Water outage".into(),
            message: "No water 10-12".into(),
            hostel: hostel.map(str::to_string),
            created_by: 1,
            author_name: "Admin".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn admins_may_post_globally() {
        let admin = Viewer::new(1, Role::Admin, None);
        assert_eq!(target_hostel(&admin, None).unwrap(), None);
        assert_eq!(target_hostel(&admin, Some("BH-2")).unwrap().as_deref(), Some("BH-2"));
    }

    #[test]
    fn wardens_post_to_own_hostel() {
        let warden = Viewer::new(2, Role::Warden, Some("BH-1".into()));
        assert_eq!(target_hostel(&warden, None).unwrap().as_deref(), Some("BH-1"));
        assert_matches!(
            target_hostel(&warden, Some("BH-2")),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }

    #[test]
    fn only_admins_delete_global_announcements() {
        let warden = Viewer::new(2, Role::Warden, Some("BH-1".into()));
        let admin = Viewer::new(1, Role::Admin, None);
        assert!(can_delete(&warden, &announcement(Some("BH-1"))));
        assert!(!can_delete(&warden, &announcement(Some("BH-2"))));
        assert!(!can_delete(&warden, &announcement(None)));
        assert!(can_delete(&admin, &announcement(None)));
    }
}
