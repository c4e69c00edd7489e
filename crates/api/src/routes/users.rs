//! Route definitions for users and subscriptions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET    /                  -> list_users
/// GET    /me                -> me
/// GET    /subscriptions     -> list_subscriptions
/// GET    /{id}              -> get_user
/// POST   /{id}/subscribe    -> subscribe
/// DELETE /{id}/subscribe    -> unsubscribe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/me", get(users::me))
        .route("/subscriptions", get(users::list_subscriptions))
        .route("/{id}", get(users::get_user))
        .route(
            "/{id}/subscribe",
            post(users::subscribe).delete(users::unsubscribe),
        )
}
