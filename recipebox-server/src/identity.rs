//! Caller identity extraction
//!
//! Authentication happens upstream. The auth layer forwards the verified
//! user as `X-User-Id` / `X-User-Name`; a request without `X-User-Id` is
//! anonymous.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use recipebox_common::Identity;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Extractor yielding the request's `Identity` (never rejects anonymous)
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| -> Result<Option<String>, ApiError> {
            match parts.headers.get(name) {
                None => Ok(None),
                Some(value) => value
                    .to_str()
                    .map(|v| Some(v.trim().to_string()))
                    .map_err(|_| ApiError::BadRequest(format!("Invalid {} header", name))),
            }
        };

        let identity = match header(USER_ID_HEADER)?.filter(|id| !id.is_empty()) {
            Some(user_id) => {
                let display_name = header(USER_NAME_HEADER)?.unwrap_or_default();
                Identity::authenticated(user_id, display_name)
            }
            None => Identity::Anonymous,
        };
        Ok(Caller(identity))
    }
}
