//! Route definitions for tags.

use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Tag routes mounted at `/tags`.
///
/// ```text
/// GET    /                  -> list_tags
/// GET    /{id}              -> get_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags))
        .route("/{id}", get(tags::get_tag))
}
