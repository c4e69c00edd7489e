use crate::types::DbId;
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A relationship row (favorite, cart entry, subscription) that the
    /// caller expected to exist is absent.
    #[error("Not found: {0}")]
    Missing(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Business-rule conflict: duplicate collection entry, self-subscription.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation error on a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        CoreError::Validation(FieldErrors::single(field, message))
    }
}
