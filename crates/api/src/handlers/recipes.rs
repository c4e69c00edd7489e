//! Handlers for recipes: listing, detail, the transactional writer and the
//! shopping-list download.
//!
//! Reads are public; writes require an [`AuthUser`], and only a recipe's
//! author may replace or delete it.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use foodgram_core::error::CoreError;
use foodgram_core::recipe::{format_ids, validate_recipe_input, RecipeInput, WriteMode};
use foodgram_core::shopping_list::{build_shopping_list, ShoppingItem, SHOPPING_LIST_FILENAME};
use foodgram_core::types::DbId;
use foodgram_db::models::recipe::{Recipe, RecipeDetail, RecipeFilter, RecipeWrite};
use foodgram_db::repositories::{CollectionRepo, RecipeRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::RecipeListParams;
use crate::response::Page;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/recipes?page&limit&tags&author&is_favorited&is_in_shopping_cart
///
/// `is_favorited` / `is_in_shopping_cart` only apply to an authenticated
/// viewer and are ignored for anonymous requests.
pub async fn list_recipes(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let params = RecipeListParams::from_pairs(&pairs)?;
    let window = params.pagination().window();
    let viewer_id = viewer.user_id();

    let filter = RecipeFilter {
        tag_slugs: params.tags,
        author_id: params.author,
        favorited_by: viewer_id.filter(|_| params.is_favorited),
        in_cart_of: viewer_id.filter(|_| params.is_in_shopping_cart),
    };

    let count = RecipeRepo::count(&state.pool, &filter).await?;
    let recipes = RecipeRepo::list(&state.pool, &filter, window.limit, window.offset).await?;
    let results = RecipeRepo::details(&state.pool, recipes, viewer_id).await?;

    Ok(Json(Page {
        count,
        page: window.page,
        limit: window.limit,
        results,
    }))
}

/// GET /api/recipes/{id}
pub async fn get_recipe(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<impl IntoResponse> {
    let detail = RecipeRepo::detail(&state.pool, recipe_id, viewer.user_id())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id: recipe_id,
        }))?;
    Ok(Json(detail))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/recipes
///
/// Validates the payload, then creates the recipe and both association sets
/// in one transaction. Returns 201 with the full representation.
pub async fn create_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RecipeInput>,
) -> AppResult<impl IntoResponse> {
    let draft = validate_recipe_input(&input, WriteMode::Create)?;

    let outcome = RecipeRepo::create(&state.pool, auth.user_id, &draft).await?;
    let recipe = written_recipe(outcome)?;

    tracing::info!(
        recipe_id = recipe.id,
        user_id = auth.user_id,
        tags = draft.tag_ids.len(),
        ingredients = draft.ingredients.len(),
        "Recipe created",
    );

    let detail = load_detail(&state, recipe.id, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT|PATCH /api/recipes/{id}
///
/// Full replace of the scalar fields and both association sets. `image`
/// may be omitted to keep the stored one. Author only.
pub async fn update_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
    JsonBody(input): JsonBody<RecipeInput>,
) -> AppResult<impl IntoResponse> {
    ensure_author(&state, recipe_id, auth.user_id).await?;

    let draft = validate_recipe_input(&input, WriteMode::Update)?;

    let outcome = RecipeRepo::replace(&state.pool, recipe_id, &draft).await?;
    let recipe = written_recipe(outcome)?;

    tracing::info!(recipe_id = recipe.id, user_id = auth.user_id, "Recipe updated");

    let detail = load_detail(&state, recipe.id, auth.user_id).await?;
    Ok(Json(detail))
}

/// DELETE /api/recipes/{id}
///
/// Author only. Associations and collection entries cascade.
pub async fn delete_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<impl IntoResponse> {
    ensure_author(&state, recipe_id, auth.user_id).await?;

    if !RecipeRepo::delete(&state.pool, recipe_id).await? {
        return Err(recipe_not_found(recipe_id));
    }

    tracing::info!(recipe_id, user_id = auth.user_id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shopping list
// ---------------------------------------------------------------------------

/// GET /api/recipes/download_shopping_cart
///
/// Plain-text attachment summing ingredient amounts across every recipe in
/// the principal's cart.
pub async fn download_shopping_cart(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rows = CollectionRepo::cart_ingredients(&state.pool, auth.user_id).await?;
    let row_count = rows.len();
    let body = build_shopping_list(rows.into_iter().map(ShoppingItem::from));

    tracing::info!(user_id = auth.user_id, rows = row_count, "Shopping list generated");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
            ),
        ],
        body,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn recipe_not_found(recipe_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Recipe",
        id: recipe_id,
    })
}

/// Reject unless `user_id` authored the recipe. 404 if it does not exist.
async fn ensure_author(state: &AppState, recipe_id: DbId, user_id: DbId) -> AppResult<()> {
    let recipe = RecipeRepo::find_by_id(&state.pool, recipe_id)
        .await?
        .ok_or_else(|| recipe_not_found(recipe_id))?;
    if recipe.author_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author may modify this recipe.".into(),
        )));
    }
    Ok(())
}

/// Map a write outcome to the written row or the matching field error.
fn written_recipe(outcome: RecipeWrite) -> AppResult<Recipe> {
    match outcome {
        RecipeWrite::Written(recipe) => Ok(recipe),
        RecipeWrite::UnknownTags(ids) => Err(CoreError::invalid_field(
            "tags",
            format!("Unknown tag ids: {}.", format_ids(&ids)),
        )
        .into()),
        RecipeWrite::UnknownIngredients(ids) => Err(CoreError::invalid_field(
            "ingredients",
            format!("Unknown ingredient ids: {}.", format_ids(&ids)),
        )
        .into()),
        RecipeWrite::RecipeMissing(recipe_id) => Err(recipe_not_found(recipe_id)),
    }
}

async fn load_detail(
    state: &AppState,
    recipe_id: DbId,
    viewer: DbId,
) -> AppResult<RecipeDetail> {
    RecipeRepo::detail(&state.pool, recipe_id, Some(viewer))
        .await?
        .ok_or_else(|| recipe_not_found(recipe_id))
}
