//! Handlers for the favorite and shopping-cart toggles.
//!
//! Both collections behave identically:
//!
//! ```text
//! POST   /api/recipes/{id}/<kind>   201 recipe summary | 400 already present | 404 unknown recipe
//! DELETE /api/recipes/{id}/<kind>   204                | 404 not present or unknown recipe
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use foodgram_core::collection::CollectionKind;
use foodgram_core::error::CoreError;
use foodgram_core::types::DbId;
use foodgram_db::models::recipe::RecipeSummary;
use foodgram_db::repositories::{CollectionRepo, RecipeRepo};

use crate::error::{AppError, AppResult};
use crate::extract::PathId;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/recipes/{id}/favorite
pub async fn add_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<impl IntoResponse> {
    add_entry(&state, CollectionKind::Favorite, auth, recipe_id).await
}

/// DELETE /api/recipes/{id}/favorite
pub async fn remove_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<impl IntoResponse> {
    remove_entry(&state, CollectionKind::Favorite, auth, recipe_id).await
}

/// POST /api/recipes/{id}/shopping_cart
pub async fn add_to_cart(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<impl IntoResponse> {
    add_entry(&state, CollectionKind::ShoppingCart, auth, recipe_id).await
}

/// DELETE /api/recipes/{id}/shopping_cart
pub async fn remove_from_cart(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<impl IntoResponse> {
    remove_entry(&state, CollectionKind::ShoppingCart, auth, recipe_id).await
}

async fn recipe_summary(state: &AppState, recipe_id: DbId) -> AppResult<RecipeSummary> {
    RecipeRepo::summary(&state.pool, recipe_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id: recipe_id,
        }))
}

/// Insert the entry; the unique constraint decides between success and
/// "already present", so concurrent duplicate adds yield one success.
async fn add_entry(
    state: &AppState,
    kind: CollectionKind,
    auth: AuthUser,
    recipe_id: DbId,
) -> AppResult<(StatusCode, Json<RecipeSummary>)> {
    let summary = recipe_summary(state, recipe_id).await?;

    if !CollectionRepo::add(&state.pool, kind, auth.user_id, recipe_id).await? {
        return Err(kind.already_present(recipe_id).into());
    }

    tracing::info!(recipe_id, user_id = auth.user_id, collection = %kind, "Recipe added");

    Ok((StatusCode::CREATED, Json(summary)))
}

async fn remove_entry(
    state: &AppState,
    kind: CollectionKind,
    auth: AuthUser,
    recipe_id: DbId,
) -> AppResult<StatusCode> {
    recipe_summary(state, recipe_id).await?;

    if !CollectionRepo::remove(&state.pool, kind, auth.user_id, recipe_id).await? {
        return Err(kind.not_present(recipe_id).into());
    }

    tracing::info!(recipe_id, user_id = auth.user_id, collection = %kind, "Recipe removed");

    Ok(StatusCode::NO_CONTENT)
}
