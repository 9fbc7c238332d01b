//! Route definitions for the `/announcement` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::announcements;
use crate::state::AppState;

/// ```text
/// GET    /       -> list_announcements
/// POST   /       -> create_announcement
/// DELETE /{id}   -> delete_announcement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route("/{id}", delete(announcements::delete_announcement))
}
