//! POST /api/recipes/:id/ratings

use axum::{
    extract::{Path, State},
    Json,
};
use recipebox_common::{Error, Recipe};
use serde::Deserialize;

use super::parse_recipe_id;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::identity::Caller;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RatingRequest {
    pub value: Option<i64>,
}

/// Add or replace the caller's rating; responds with the whole recipe so the
/// client can recompute the average
pub async fn add_rating(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Path(id): Path<String>,
    request: Result<ApiJson<RatingRequest>, ApiError>,
) -> ApiResult<Json<Recipe>> {
    identity.require()?;
    let ApiJson(request) = request?;
    let id = parse_recipe_id(&id)?;
    let value = request
        .value
        .ok_or_else(|| Error::invalid("value", "Rating must be between 1 and 5"))?;
    Ok(Json(state.service.add_rating(&id, value, &identity).await?))
}
