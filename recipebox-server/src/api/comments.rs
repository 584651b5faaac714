//! POST /api/recipes/:id/comments

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use recipebox_common::Comment;
use serde::Deserialize;

use super::parse_recipe_id;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::identity::Caller;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentRequest {
    pub text: String,
}

/// Append a comment; any signed-in user may comment
pub async fn add_comment(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Path(id): Path<String>,
    request: Result<ApiJson<CommentRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    identity.require()?;
    let ApiJson(request) = request?;
    let id = parse_recipe_id(&id)?;
    let comment = state
        .service
        .add_comment(&id, &request.text, &identity)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
