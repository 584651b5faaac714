//! Common error types for recipebox

use serde::Serialize;
use thiserror::Error;

/// Common result type for recipebox operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the offending field (e.g. `prepTime`)
    pub field: String,
    /// Human-readable constraint that was violated
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Error taxonomy for the recipe core
///
/// The first five variants are user-facing outcomes and must stay
/// distinguishable all the way to the request boundary. The rest are
/// internal failures surfaced as an opaque server error.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more input fields failed validation
    #[error("Validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    /// Referenced recipe does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Acting user is not allowed to perform this write
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Recipe creation without an uploaded image or image URL
    #[error("Recipe image is required")]
    ImageMissing,

    /// Write attempted without an authenticated identity
    #[error("Authentication required")]
    Unauthenticated,

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a validation failure on a single field
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation(vec![FieldError::new(field, message)])
    }

    /// True for the outcomes a caller caused (as opposed to server faults)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::NotFound(_)
                | Error::Forbidden(_)
                | Error::ImageMissing
                | Error::Unauthenticated
        )
    }
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = Error::Validation(vec![
            FieldError::new("title", "Title must be between 3 and 100 characters"),
            FieldError::new("servings", "Servings must be at least 1"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("title: Title must be"));
        assert!(msg.contains("servings: Servings must be at least 1"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::ImageMissing.is_client_error());
        assert!(Error::NotFound("x".into()).is_client_error());
        assert!(!Error::Internal("boom".into()).is_client_error());
        assert!(!Error::Config("bad".into()).is_client_error());
    }
}
