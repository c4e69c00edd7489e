//! JWT-based principal extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use foodgram_core::error::CoreError;
use foodgram_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

/// Principal for endpoints that also serve anonymous readers.
///
/// `None` when no `Authorization` header is sent. A header that is present
/// but malformed or carries an invalid token is still rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<DbId> {
        self.0.map(|user| user.user_id)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_principal(parts, state)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(bearer_principal(parts, state)?))
    }
}

/// Decode the Bearer token, if any, into a principal.
fn bearer_principal(parts: &Parts, state: &AppState) -> Result<Option<AuthUser>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(Some(AuthUser {
        user_id: claims.sub,
    }))
}
