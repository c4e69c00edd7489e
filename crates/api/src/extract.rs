//! Body and path extractors that reject through [`AppError`].
//!
//! axum's own `Json` and `Path` rejections answer with plain text. These
//! wrappers turn them into the usual `{ "errors": ..., "code": ... }` body
//! with field-keyed validation messages.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use foodgram_core::error::CoreError;
use foodgram_core::types::DbId;
use foodgram_core::validation::{FieldErrors, NON_FIELD_ERRORS};
use serde::de::DeserializeOwned;

use crate::error::AppError;

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Route parameter name shared by every `/{id}` route.
const ID_PARAM: &str = "id";

/// JSON request body. Type mismatches become 400 `VALIDATION_ERROR` keyed by
/// the top-level field that failed to deserialize.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(json_rejection_error(rejection)),
        }
    }
}

/// The `{id}` segment of a route. A non-integer id is a 400 on `id`.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub DbId);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<DbId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(PathId(id)),
            Err(rejection) => Err(path_rejection_error(rejection)),
        }
    }
}

fn json_rejection_error(rejection: JsonRejection) -> AppError {
    let errors = match &rejection {
        JsonRejection::JsonDataError(_) => data_error_fields(&rejection.body_text()),
        JsonRejection::JsonSyntaxError(_) => {
            FieldErrors::single(NON_FIELD_ERRORS, "Request body is not valid JSON.")
        }
        JsonRejection::MissingJsonContentType(_) => FieldErrors::single(
            NON_FIELD_ERRORS,
            "Expected request with `Content-Type: application/json`.",
        ),
        _ => return AppError::BadRequest(rejection.body_text()),
    };
    AppError::Core(CoreError::Validation(errors))
}

fn path_rejection_error(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(_) => {
            CoreError::invalid_field(ID_PARAM, "A valid integer is required.").into()
        }
        other => AppError::InternalError(other.body_text()),
    }
}

/// Key a deserialization message by the top-level field in its path.
///
/// `ingredients[0].amount: invalid type ...` is reported under
/// `ingredients` with the full path kept in the message. Errors without a
/// field path land under [`NON_FIELD_ERRORS`].
fn data_error_fields(body_text: &str) -> FieldErrors {
    let detail = body_text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(body_text);

    if let Some((path, message)) = detail.split_once(": ") {
        if let Some(field) = top_level_field(path) {
            let message = if field == path { message } else { detail };
            return FieldErrors::single(field, message);
        }
    }
    FieldErrors::single(NON_FIELD_ERRORS, detail)
}

fn top_level_field(path: &str) -> Option<&str> {
    let is_path = path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    if !is_path {
        return None;
    }
    path.split(['.', '[']).next().filter(|field| !field.is_empty())
}
