//! HTTP error mapping for recipebox-server
//!
//! Each user-facing outcome of the recipe core gets its own status code and
//! machine-readable code. Internal failures are logged and reported opaquely.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipebox_common::Error as RecipeError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error from the recipe core
    #[error(transparent)]
    Recipe(#[from] RecipeError),

    /// Malformed request outside the core's validation (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload larger than the configured limit (413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Upload that is not an accepted image type (415)
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Recipe(e) => match e {
                RecipeError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
                RecipeError::ImageMissing => (StatusCode::BAD_REQUEST, "IMAGE_REQUIRED"),
                RecipeError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
                RecipeError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                RecipeError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            },
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            ApiError::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_MEDIA_TYPE")
            }
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "Request failed");
            json!({
                "error": {
                    "code": code,
                    "message": "Internal server error",
                }
            })
        } else if let ApiError::Recipe(RecipeError::Validation(fields)) = &self {
            json!({
                "error": {
                    "code": code,
                    "message": "Validation failed",
                    "details": fields,
                }
            })
        } else {
            json!({
                "error": {
                    "code": code,
                    "message": self.to_string(),
                }
            })
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_common::FieldError;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_core_errors_map_to_distinct_statuses() {
        assert_eq!(
            status_of(RecipeError::invalid("title", "too short").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RecipeError::NotFound("x".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RecipeError::Forbidden("x".into()).into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(RecipeError::Unauthenticated.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(RecipeError::Internal("x".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_image_missing_and_validation_have_different_codes() {
        let missing: ApiError = RecipeError::ImageMissing.into();
        let invalid: ApiError =
            RecipeError::Validation(vec![FieldError::new("title", "too short")]).into();
        assert_eq!(missing.parts().1, "IMAGE_REQUIRED");
        assert_eq!(invalid.parts().1, "VALIDATION_FAILED");
    }
}
