//! HTTP API handlers for recipebox-server

pub mod comments;
pub mod health;
pub mod ratings;
pub mod recipes;
pub mod uploads;

pub use comments::add_comment;
pub use health::health_routes;
pub use ratings::add_rating;
pub use recipes::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe};
pub use uploads::upload_image;

use recipebox_common::{uuid_utils, Error, RecipeId};

use crate::error::ApiError;

/// Parse a recipe id from a path segment
///
/// An id that is not a UUID cannot exist, so it is reported as not found
/// rather than as a malformed request.
pub(crate) fn parse_recipe_id(raw: &str) -> Result<RecipeId, ApiError> {
    uuid_utils::parse(raw)
        .map_err(|_| Error::NotFound(format!("Recipe not found: {}", raw)).into())
}
