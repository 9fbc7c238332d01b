//! Route definitions for the `/fee` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::fees;
use crate::state::AppState;

/// ```text
/// GET  /                                  -> overview
/// POST /{fee_type}                        -> submit
/// GET  /students                          -> list_students
/// GET  /students/{id}                     -> student_fees
/// GET  /students/{id}/timeline            -> student_timeline
/// POST /students/{id}/{fee_type}/approve  -> approve
/// POST /students/{id}/{fee_type}/reject   -> reject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fees::overview))
        .route("/{fee_type}", post(fees::submit))
        .route("/students", get(fees::list_students))
        .route("/students/{id}", get(fees::student_fees))
        .route("/students/{id}/timeline", get(fees::student_timeline))
        .route("/students/{id}/{fee_type}/approve", post(fees::approve))
        .route("/students/{id}/{fee_type}/reject", post(fees::reject))
}
