//! Handlers for ingredient reference data. Public, read-only.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use foodgram_core::error::CoreError;
use foodgram_db::repositories::IngredientRepo;

use crate::error::{AppError, AppResult};
use crate::extract::PathId;
use crate::query::IngredientSearchParams;
use crate::state::AppState;

/// GET /api/ingredients?name=
///
/// Ingredients whose name starts with `name` (case-insensitive), or all of
/// them when `name` is absent.
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(params): Query<IngredientSearchParams>,
) -> AppResult<impl IntoResponse> {
    let ingredients = IngredientRepo::list(&state.pool, params.name.as_deref()).await?;
    Ok(Json(ingredients))
}

/// GET /api/ingredients/{id}
pub async fn get_ingredient(
    State(state): State<AppState>,
    PathId(ingredient_id): PathId,
) -> AppResult<impl IntoResponse> {
    let ingredient = IngredientRepo::find_by_id(&state.pool, ingredient_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ingredient",
            id: ingredient_id,
        }))?;
    Ok(Json(ingredient))
}
