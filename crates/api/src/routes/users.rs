//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// POST   /           -> create_user
/// GET    /students   -> list_students
/// GET    /wardens    -> list_wardens
/// GET    /{id}       -> get_user
/// DELETE /{id}       -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create_user))
        .route("/students", get(users::list_students))
        .route("/wardens", get(users::list_wardens))
        .route("/{id}", get(users::get_user).delete(users::delete_user))
}
