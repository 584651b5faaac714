//! Recipe entity model
//!
//! Field contracts for recipes and their social annotations. Wire names are
//! camelCase to match the REST contract consumed by the browser client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable recipe identifier, assigned by the collection store
pub type RecipeId = Uuid;

/// Preparation difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse the exact wire spelling (`Easy`, `Medium`, `Hard`)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comment on a recipe. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub author_id: String,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// One user's star rating (1-5), unique per (recipe, user)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user_id: String,
    pub value: u8,
}

/// The core content entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub category: String,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub author_id: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recipe {
    /// Arithmetic mean of all rating values, 0.0 when unrated
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.ratings.iter().map(|r| u32::from(r.value)).sum();
        f64::from(sum) / self.ratings.len() as f64
    }

    /// The given user's rating value, if any
    pub fn rating_for(&self, user_id: &str) -> Option<u8> {
        self.ratings
            .iter()
            .find(|r| r.user_id == user_id)
            .map(|r| r.value)
    }

    /// Insert or replace the rating for `user_id`
    ///
    /// Returns true when an existing rating was overwritten. The rating keeps
    /// its position in the list on overwrite.
    pub fn upsert_rating(&mut self, user_id: &str, value: u8) -> bool {
        match self.ratings.iter_mut().find(|r| r.user_id == user_id) {
            Some(existing) => {
                existing.value = value;
                true
            }
            None => {
                self.ratings.push(Rating {
                    user_id: user_id.to_string(),
                    value,
                });
                false
            }
        }
    }

    /// Total time in minutes when at least one of prep/cook time is known
    ///
    /// Saturates at `u32::MAX`.
    pub fn total_time(&self) -> Option<u32> {
        match (self.prep_time, self.cook_time) {
            (None, None) => None,
            (prep, cook) => Some(prep.unwrap_or(0).saturating_add(cook.unwrap_or(0))),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal valid recipe for unit tests
    pub fn recipe(title: &str, author_id: &str, created_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id: Uuid::nil(),
            title: title.to_string(),
            description: format!("{title} described at length"),
            image_url: "https://example.com/image.jpg".to_string(),
            ingredients: vec!["flour".to_string()],
            instructions: vec!["mix".to_string()],
            category: "Dinner".to_string(),
            prep_time: None,
            cook_time: None,
            servings: None,
            difficulty: None,
            author_id: author_id.to_string(),
            author_name: author_id.to_string(),
            created_at,
            updated_at: created_at,
            comments: Vec::new(),
            ratings: Vec::new(),
            tags: Vec::new(),
        }
    }
}
