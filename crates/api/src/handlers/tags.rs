//! Handlers for tag reference data. Public, read-only.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use foodgram_core::error::CoreError;
use foodgram_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::extract::PathId;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(tags))
}

/// GET /api/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    PathId(tag_id): PathId,
) -> AppResult<impl IntoResponse> {
    let tag = TagRepo::find_by_id(&state.pool, tag_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tag",
            id: tag_id,
        }))?;
    Ok(Json(tag))
}
