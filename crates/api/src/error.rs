use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use foodgram_core::error::CoreError;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{ "errors": ..., "code": "..." }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `foodgram_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, errors): (StatusCode, &str, Value) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    json!(format!("{entity} with id {id} not found")),
                ),
                CoreError::Missing(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", json!(msg)),
                CoreError::Validation(fields) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", json!(fields))
                }
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", json!(msg)),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", json!(msg))
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", json!(msg)),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        json!(INTERNAL_MESSAGE),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => {
                let (status, code, msg) = classify_sqlx_error(err);
                (status, code, json!(msg))
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", json!(msg)),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    json!(INTERNAL_MESSAGE),
                )
            }
        };

        let body = json!({
            "errors": errors,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on a `uq_*` constraint map to 400 `CONFLICT`.
/// - Check violations map to 400 `BAD_REQUEST`.
/// - Foreign key violations map to 404 (the referenced row vanished).
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // unique_violation
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // check_violation
                Some("23514") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "BAD_REQUEST",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                // foreign_key_violation
                Some("23503") => {
                    return (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        "Referenced resource not found".to_string(),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
