//! Route definitions for the `/mess` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::mess;
use crate::state::AppState;

/// ```text
/// GET  /menu      -> get_menu
/// PUT  /menu      -> upsert_menu
/// GET  /feedback  -> list_feedback
/// POST /feedback  -> create_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(mess::get_menu).put(mess::upsert_menu))
        .route(
            "/feedback",
            get(mess::list_feedback).post(mess::create_feedback),
        )
}
