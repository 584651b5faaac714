//! JSON body extraction
//!
//! A wrongly typed field is a validation error naming the field path;
//! unparseable JSON is a bad request.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use recipebox_common::{Error as RecipeError, FieldError};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body; rejections are `ApiError`s
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        decode(&bytes).map(ApiJson)
    }
}

/// Decode `bytes`, mapping type mismatches to a field-level validation error
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value: T = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();
        if inner.is_data() {
            let field = if path == "." { "body".to_string() } else { path };
            ApiError::Recipe(RecipeError::Validation(vec![FieldError::new(
                field,
                inner.to_string(),
            )]))
        } else {
            ApiError::BadRequest(format!("Malformed JSON body: {}", inner))
        }
    })?;
    deserializer
        .end()
        .map_err(|e| ApiError::BadRequest(format!("Malformed JSON body: {}", e)))?;
    Ok(value)
}
