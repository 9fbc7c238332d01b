//! Route definitions for the `/complaints` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::complaints;
use crate::state::AppState;

/// ```text
/// GET  /                -> list_complaints
/// POST /                -> create_complaint
/// GET  /{id}            -> get_complaint
/// GET  /{id}/timeline   -> get_timeline
/// POST /{id}/resolve    -> mark_resolved
/// POST /{id}/reject     -> reject
/// POST /{id}/confirm    -> confirm
/// POST /{id}/dispute    -> dispute
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(complaints::list_complaints).post(complaints::create_complaint),
        )
        .route("/{id}", get(complaints::get_complaint))
        .route("/{id}/timeline", get(complaints::get_timeline))
        .route("/{id}/resolve", post(complaints::mark_resolved))
        .route("/{id}/reject", post(complaints::reject))
        .route("/{id}/confirm", post(complaints::confirm))
        .route("/{id}/dispute", post(complaints::dispute))
}
