//! Recipe collection endpoints
//!
//! GET/POST /api/recipes, GET/PUT/DELETE /api/recipes/:id

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use recipebox_common::validation::{RecipeDraft, RecipePatch};
use recipebox_common::{Recipe, RecipeQuery, SortOrder};
use serde::Deserialize;

use super::parse_recipe_id;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::identity::Caller;
use crate::AppState;

/// Query parameters for the recipe listing
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Exact category; "All" or absent means every category
    pub category: Option<String>,
    /// Case-insensitive substring of title, description or a tag
    pub search: Option<String>,
    /// newest (default), oldest or rating
    pub sort: Option<String>,
}

impl From<ListParams> for RecipeQuery {
    fn from(params: ListParams) -> Self {
        RecipeQuery {
            category: params.category,
            search: params.search,
            sort: params
                .sort
                .as_deref()
                .map(SortOrder::from_param)
                .unwrap_or_default(),
        }
    }
}

/// GET /api/recipes?category=&search=&sort=
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Recipe>> {
    Json(state.service.list(&params.into()).await)
}

/// GET /api/recipes/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Recipe>> {
    let id = parse_recipe_id(&id)?;
    Ok(Json(state.service.get(&id).await?))
}

/// POST /api/recipes
///
/// Returns 201 with the stored recipe, stamped with the caller as author.
pub async fn create_recipe(
    State(state): State<AppState>,
    Caller(identity): Caller,
    draft: Result<ApiJson<RecipeDraft>, ApiError>,
) -> ApiResult<(StatusCode, Json<Recipe>)> {
    identity.require()?;
    let ApiJson(draft) = draft?;
    let recipe = state.service.create(&draft, &identity).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// PUT /api/recipes/:id (author only)
pub async fn update_recipe(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Path(id): Path<String>,
    patch: Result<ApiJson<RecipePatch>, ApiError>,
) -> ApiResult<Json<Recipe>> {
    identity.require()?;
    let ApiJson(patch) = patch?;
    let id = parse_recipe_id(&id)?;
    Ok(Json(state.service.update(&id, &patch, &identity).await?))
}

/// DELETE /api/recipes/:id (author only)
pub async fn delete_recipe(
    State(state): State<AppState>,
    Caller(identity): Caller,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    identity.require()?;
    let id = parse_recipe_id(&id)?;
    state.service.delete(&id, &identity).await?;
    Ok(StatusCode::NO_CONTENT)
}
