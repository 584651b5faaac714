//! POST /api/uploads?filename=NAME
//!
//! Raw image bytes in the body. The response's `imageUrl` is what clients
//! pass as `imageUpload` when creating or updating a recipe.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::identity::Caller;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Original file name; its extension selects the stored file type
    pub filename: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}

pub async fn upload_image(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    identity.require()?;
    if params.filename.trim().is_empty() {
        return Err(ApiError::BadRequest("filename is required".to_string()));
    }
    let image_url = state.images.save(&params.filename, &body).await?;
    Ok((StatusCode::CREATED, Json(UploadResponse { image_url })))
}
