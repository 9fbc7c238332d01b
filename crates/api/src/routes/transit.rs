//! Route definitions for the `/transit` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::transit;
use crate::state::AppState;

/// ```text
/// GET  /  -> list_entries
/// POST /  -> create_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(transit::list_entries).post(transit::create_entry))
}
