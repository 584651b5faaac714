//! Presentation adapter
//!
//! Maps recipes to the view state a client renders: rating aggregates,
//! star widget breakdown, favorite flag and the viewer's own rating.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::favorites::FavoriteSet;
use crate::identity::Identity;
use crate::models::{Difficulty, Recipe, RecipeId};

/// Number of stars in the rating widget
pub const MAX_STARS: u8 = 5;

/// Star widget breakdown for an average rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarDisplay {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarDisplay {
    pub fn for_average(average: f64) -> Self {
        let average = average.clamp(0.0, f64::from(MAX_STARS));
        // Clamped to [0, 5] above
        let full = average.floor() as u8;
        let half = average.fract() != 0.0;
        let empty = MAX_STARS - full - u8::from(half);
        Self { full, half, empty }
    }
}

/// Client-displayable recipe card / detail header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub difficulty: Option<Difficulty>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub total_time: Option<u32>,
    pub servings: Option<u32>,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub average_rating: f64,
    pub rating_count: usize,
    pub stars: StarDisplay,
    pub comment_count: usize,
    /// The viewer's own rating, when signed in and rated
    pub user_rating: Option<u8>,
    pub is_favorite: bool,
    /// Viewer is the author (may edit/delete)
    pub can_edit: bool,
}

/// Build the view of `recipe` for `viewer`
pub fn present<F: FavoriteSet + ?Sized>(
    recipe: &Recipe,
    viewer: &Identity,
    favorites: &F,
) -> RecipeView {
    let average_rating = recipe.average_rating();
    RecipeView {
        id: recipe.id,
        title: recipe.title.clone(),
        description: recipe.description.clone(),
        image_url: recipe.image_url.clone(),
        category: recipe.category.clone(),
        difficulty: recipe.difficulty,
        prep_time: recipe.prep_time,
        cook_time: recipe.cook_time,
        total_time: recipe.total_time(),
        servings: recipe.servings,
        author_name: recipe.author_name.clone(),
        created_at: recipe.created_at,
        tags: recipe.tags.clone(),
        average_rating,
        rating_count: recipe.ratings.len(),
        stars: StarDisplay::for_average(average_rating),
        comment_count: recipe.comments.len(),
        user_rating: viewer.user_id().and_then(|uid| recipe.rating_for(uid)),
        is_favorite: favorites.is_favorite(&recipe.id),
        can_edit: viewer.is_author_of(&recipe.author_id),
    }
}

/// Views for a whole listing, preserving order
pub fn present_all<F: FavoriteSet + ?Sized>(
    recipes: &[Recipe],
    viewer: &Identity,
    favorites: &F,
) -> Vec<RecipeView> {
    recipes
        .iter()
        .map(|r| present(r, viewer, favorites))
        .collect()
}

/// The favorites page: favorited recipes in collection order
pub fn favorite_recipes<'a, F: FavoriteSet + ?Sized>(
    recipes: &'a [Recipe],
    favorites: &F,
) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|r| favorites.is_favorite(&r.id))
        .collect()
}
