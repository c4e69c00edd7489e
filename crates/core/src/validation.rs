//! Field-keyed validation error map.
//!
//! Serializes as `{ "field": ["message", ...] }` so API clients can attach
//! each message to the offending form field.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Generic message for a required field that is absent or empty.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Key for errors that belong to the payload as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Ordered map of field name to the validation messages raised for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error map holding one message for one field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a message against a field. Identical messages are kept once.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        let messages = self.0.entry(field.to_string()).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for `field`, empty when the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Fold the output of a `validator` derive into this map.
    ///
    /// Rules without an explicit `message` fall back to their rule code.
    pub fn merge_validator(&mut self, errors: &validator::ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                self.add(&field.to_string(), message);
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
