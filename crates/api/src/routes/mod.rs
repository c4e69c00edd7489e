pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tags                                        list
/// /tags/{id}                                   get
///
/// /ingredients?name=                           list (prefix filter)
/// /ingredients/{id}                            get
///
/// /recipes                                     list, create
/// /recipes/download_shopping_cart              shopping list (text/plain)
/// /recipes/{id}                                get, put, patch, delete
/// /recipes/{id}/favorite                       add, remove
/// /recipes/{id}/shopping_cart                  add, remove
///
/// /users                                       list
/// /users/me                                    principal profile
/// /users/subscriptions                         followed authors
/// /users/{id}                                  profile
/// /users/{id}/subscribe                        follow, unfollow
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tags", tags::router())
        .nest("/ingredients", ingredients::router())
        .nest("/recipes", recipes::router())
        .nest("/users", users::router())
}
