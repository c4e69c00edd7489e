//! Handlers for user profiles and author subscriptions.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use foodgram_core::error::CoreError;
use foodgram_core::subscription::{already_subscribed, ensure_not_self, not_subscribed};
use foodgram_core::types::DbId;
use foodgram_db::models::user::{AuthorWithRecipes, UserProfile};
use foodgram_db::repositories::{RecipeRepo, SubscriptionRepo, UserRepo};
use foodgram_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::PathId;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::{PaginationParams, RecipesLimitParams, SubscriptionListParams};
use crate::response::Page;
use crate::state::AppState;

fn user_not_found(user_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        id: user_id,
    })
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// GET /api/users?page&limit
pub async fn list_users(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let window = params.window();
    let count = UserRepo::count(&state.pool).await?;
    let results =
        UserRepo::list_profiles(&state.pool, viewer.user_id(), window.limit, window.offset)
            .await?;

    Ok(Json(Page {
        count,
        page: window.page,
        limit: window.limit,
        results,
    }))
}

/// GET /api/users/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = UserRepo::profile(&state.pool, auth.user_id, Some(auth.user_id))
        .await?
        .ok_or_else(|| user_not_found(auth.user_id))?;
    Ok(Json(profile))
}

/// GET /api/users/{id}
pub async fn get_user(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    PathId(user_id): PathId,
) -> AppResult<impl IntoResponse> {
    let profile = UserRepo::profile(&state.pool, user_id, viewer.user_id())
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    Ok(Json(profile))
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// GET /api/users/subscriptions?page&limit&recipes_limit
///
/// Authors the principal follows, each with their recipes (capped by
/// `recipes_limit`) and total recipe count.
pub async fn list_subscriptions(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SubscriptionListParams>,
) -> AppResult<impl IntoResponse> {
    let window = params.pagination().window();
    let cap = params.cap();

    let count = SubscriptionRepo::count_authors(&state.pool, auth.user_id).await?;
    let authors =
        SubscriptionRepo::list_authors(&state.pool, auth.user_id, window.limit, window.offset)
            .await?;

    let mut results = Vec::with_capacity(authors.len());
    for profile in authors {
        results.push(with_recipes(&state.pool, profile, cap).await?);
    }

    Ok(Json(Page {
        count,
        page: window.page,
        limit: window.limit,
        results,
    }))
}

/// POST /api/users/{id}/subscribe?recipes_limit
///
/// Self-subscription is rejected before anything else is looked at.
pub async fn subscribe(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(author_id): PathId,
    Query(params): Query<RecipesLimitParams>,
) -> AppResult<impl IntoResponse> {
    ensure_not_self(auth.user_id, author_id)?;

    if !UserRepo::exists(&state.pool, author_id).await? {
        return Err(user_not_found(author_id));
    }

    if !SubscriptionRepo::add(&state.pool, auth.user_id, author_id).await? {
        return Err(already_subscribed(author_id).into());
    }

    tracing::info!(author_id, user_id = auth.user_id, "Subscribed to author");

    let profile = UserRepo::profile(&state.pool, author_id, Some(auth.user_id))
        .await?
        .ok_or_else(|| user_not_found(author_id))?;
    let body = with_recipes(&state.pool, profile, params.cap()).await?;

    Ok((StatusCode::CREATED, Json(body)))
}

/// DELETE /api/users/{id}/subscribe
pub async fn unsubscribe(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(author_id): PathId,
) -> AppResult<impl IntoResponse> {
    if !UserRepo::exists(&state.pool, author_id).await? {
        return Err(user_not_found(author_id));
    }

    if !SubscriptionRepo::remove(&state.pool, auth.user_id, author_id).await? {
        return Err(not_subscribed(author_id).into());
    }

    tracing::info!(author_id, user_id = auth.user_id, "Unsubscribed from author");

    Ok(StatusCode::NO_CONTENT)
}

/// Attach an author's recipes (optionally capped) and total count.
async fn with_recipes(
    pool: &DbPool,
    profile: UserProfile,
    cap: Option<i64>,
) -> AppResult<AuthorWithRecipes> {
    let recipes = RecipeRepo::summaries_by_author(pool, profile.id, cap).await?;
    let recipes_count = RecipeRepo::count_by_author(pool, profile.id).await?;
    Ok(AuthorWithRecipes {
        profile,
        recipes,
        recipes_count,
    })
}
