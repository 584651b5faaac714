//! Input DTOs and field validation for recipe mutations
//!
//! Validation collects every failing field rather than stopping at the
//! first, so clients can highlight all problems in one round trip.

use serde::{Deserialize, Deserializer};

use crate::error::FieldError;
use crate::models::{Difficulty, Recipe};
use crate::query::ALL_CATEGORIES;
use crate::{Error, Result};

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 500;
pub const COMMENT_MIN: usize = 1;
pub const COMMENT_MAX: usize = 500;
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

/// Fields supplied when creating a recipe
///
/// Numeric fields are signed so that negative input reaches validation
/// instead of failing to decode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    /// Direct image URL
    pub image_url: Option<String>,
    /// Reference returned by the image upload collaborator
    pub image_upload: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub category: String,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub servings: Option<i64>,
    pub difficulty: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Fields supplied when updating a recipe; absent fields are left alone
///
/// The optional recipe fields (times, servings, difficulty) accept an
/// explicit `null` to clear the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_upload: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub category: Option<String>,
    #[serde(deserialize_with = "present_or_null")]
    pub prep_time: Option<Option<i64>>,
    #[serde(deserialize_with = "present_or_null")]
    pub cook_time: Option<Option<i64>>,
    #[serde(deserialize_with = "present_or_null")]
    pub servings: Option<Option<i64>>,
    #[serde(deserialize_with = "present_or_null")]
    pub difficulty: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

/// Distinguish `"field": null` (Some(None)) from an absent field (None)
fn present_or_null<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Where a recipe image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Reference produced by the file-storage collaborator
    Uploaded(String),
    /// Caller-supplied URL
    Url(String),
}

impl ImageSource {
    /// Pick the image reference; an upload takes precedence over a URL
    pub fn resolve(upload: Option<&str>, url: Option<&str>) -> Option<Self> {
        fn present(s: Option<&str>) -> Option<String> {
            s.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
        }
        present(upload)
            .map(ImageSource::Uploaded)
            .or_else(|| present(url).map(ImageSource::Url))
    }

    pub fn into_reference(self) -> String {
        match self {
            ImageSource::Uploaded(r) | ImageSource::Url(r) => r,
        }
    }
}

/// Constraints that depend on configuration
#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
    /// Accepted categories; empty accepts any non-empty category
    pub categories: Vec<String>,
}

impl ValidationRules {
    pub fn with_categories(categories: Vec<String>) -> Self {
        Self { categories }
    }
}

/// Create input after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub title: String,
    pub description: String,
    pub image: ImageSource,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub category: String,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub tags: Vec<String>,
}

/// Update input after validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageSource>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub category: Option<String>,
    pub prep_time: Option<Option<u32>>,
    pub cook_time: Option<Option<u32>>,
    pub servings: Option<Option<u32>>,
    pub difficulty: Option<Option<Difficulty>>,
    pub tags: Option<Vec<String>>,
}

impl ValidPatch {
    /// Merge the changed fields into `recipe`
    pub fn apply_to(self, recipe: &mut Recipe) {
        if let Some(title) = self.title {
            recipe.title = title;
        }
        if let Some(description) = self.description {
            recipe.description = description;
        }
        if let Some(image) = self.image {
            recipe.image_url = image.into_reference();
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = instructions;
        }
        if let Some(category) = self.category {
            recipe.category = category;
        }
        if let Some(prep_time) = self.prep_time {
            recipe.prep_time = prep_time;
        }
        if let Some(cook_time) = self.cook_time {
            recipe.cook_time = cook_time;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        if let Some(difficulty) = self.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(tags) = self.tags {
            recipe.tags = tags;
        }
    }
}

/// Accumulates field errors while validating
#[derive(Debug, Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    fn finish<T>(self, value: T) -> Result<T> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(Error::Validation(self.errors))
        }
    }

    fn title(&mut self, value: &str) -> String {
        self.text(
            "title",
            value,
            TITLE_MIN,
            TITLE_MAX,
            "Title must be between 3 and 100 characters",
        )
    }

    fn description(&mut self, value: &str) -> String {
        self.text(
            "description",
            value,
            DESCRIPTION_MIN,
            DESCRIPTION_MAX,
            "Description must be between 10 and 500 characters",
        )
    }

    fn text(&mut self, field: &str, value: &str, min: usize, max: usize, message: &str) -> String {
        let trimmed = value.trim();
        let len = trimmed.chars().count();
        if len < min || len > max {
            self.fail(field, message);
        }
        trimmed.to_string()
    }

    fn steps(&mut self, field: &str, values: &[String], message: &str) -> Vec<String> {
        let steps: Vec<String> = values
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if steps.is_empty() {
            self.fail(field, message);
        }
        steps
    }

    fn category(&mut self, value: &str, rules: &ValidationRules) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.fail("category", "Category is required");
        } else if trimmed == ALL_CATEGORIES {
            self.fail("category", "Category must be a specific category");
        } else if !rules.categories.is_empty() && !rules.categories.iter().any(|c| c == trimmed) {
            self.fail(
                "category",
                &format!("Category must be one of: {}", rules.categories.join(", ")),
            );
        }
        trimmed.to_string()
    }

    fn minutes(&mut self, field: &str, value: Option<i64>, message: &str) -> Option<u32> {
        let value = value?;
        match u32::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                self.fail(field, message);
                None
            }
        }
    }

    fn servings(&mut self, value: Option<i64>) -> Option<u32> {
        let value = value?;
        match u32::try_from(value) {
            Ok(v) if v >= 1 => Some(v),
            _ => {
                self.fail("servings", "Servings must be at least 1");
                None
            }
        }
    }

    fn difficulty(&mut self, value: Option<&str>) -> Option<Difficulty> {
        let value = value?;
        let parsed = Difficulty::parse(value.trim());
        if parsed.is_none() {
            self.fail("difficulty", "Difficulty must be Easy, Medium, or Hard");
        }
        parsed
    }
}

const PREP_TIME_MESSAGE: &str = "Prep time must be zero or more minutes";
const COOK_TIME_MESSAGE: &str = "Cook time must be zero or more minutes";
const INGREDIENTS_MESSAGE: &str = "At least one ingredient is required";
const INSTRUCTIONS_MESSAGE: &str = "At least one instruction is required";

/// Trim tags, drop blanks and collapse duplicates (first occurrence wins)
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !out.iter().any(|existing| existing == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Validate a create request
///
/// Field errors are reported before a missing image.
pub fn validate_draft(draft: &RecipeDraft, rules: &ValidationRules) -> Result<ValidDraft> {
    let mut c = Checker::default();
    let title = c.title(&draft.title);
    let description = c.description(&draft.description);
    let ingredients = c.steps("ingredients", &draft.ingredients, INGREDIENTS_MESSAGE);
    let instructions = c.steps("instructions", &draft.instructions, INSTRUCTIONS_MESSAGE);
    let category = c.category(&draft.category, rules);
    let prep_time = c.minutes("prepTime", draft.prep_time, PREP_TIME_MESSAGE);
    let cook_time = c.minutes("cookTime", draft.cook_time, COOK_TIME_MESSAGE);
    let servings = c.servings(draft.servings);
    let difficulty = c.difficulty(draft.difficulty.as_deref());
    let tags = draft.tags.as_deref().map(normalize_tags).unwrap_or_default();
    c.finish(())?;

    let image = ImageSource::resolve(draft.image_upload.as_deref(), draft.image_url.as_deref())
        .ok_or(Error::ImageMissing)?;

    Ok(ValidDraft {
        title,
        description,
        image,
        ingredients,
        instructions,
        category,
        prep_time,
        cook_time,
        servings,
        difficulty,
        tags,
    })
}

/// Validate an update request; only present fields are checked
pub fn validate_patch(patch: &RecipePatch, rules: &ValidationRules) -> Result<ValidPatch> {
    let mut c = Checker::default();
    let valid = ValidPatch {
        title: patch.title.as_deref().map(|v| c.title(v)),
        description: patch.description.as_deref().map(|v| c.description(v)),
        image: ImageSource::resolve(patch.image_upload.as_deref(), patch.image_url.as_deref()),
        ingredients: patch
            .ingredients
            .as_deref()
            .map(|v| c.steps("ingredients", v, INGREDIENTS_MESSAGE)),
        instructions: patch
            .instructions
            .as_deref()
            .map(|v| c.steps("instructions", v, INSTRUCTIONS_MESSAGE)),
        category: patch.category.as_deref().map(|v| c.category(v, rules)),
        prep_time: patch
            .prep_time
            .map(|v| c.minutes("prepTime", v, PREP_TIME_MESSAGE)),
        cook_time: patch
            .cook_time
            .map(|v| c.minutes("cookTime", v, COOK_TIME_MESSAGE)),
        servings: patch.servings.map(|v| c.servings(v)),
        difficulty: patch
            .difficulty
            .as_ref()
            .map(|v| c.difficulty(v.as_deref())),
        tags: patch.tags.as_deref().map(normalize_tags),
    };
    c.finish(valid)
}

/// Validate comment text (trimmed, 1-500 characters)
pub fn validate_comment_text(text: &str) -> Result<String> {
    let mut c = Checker::default();
    let text = c.text(
        "text",
        text,
        COMMENT_MIN,
        COMMENT_MAX,
        "Comment must be between 1 and 500 characters",
    );
    c.finish(text)
}

/// Validate a rating value (integer 1-5)
pub fn validate_rating_value(value: i64) -> Result<u8> {
    if (RATING_MIN..=RATING_MAX).contains(&value) {
        // Range-checked above
        Ok(value as u8)
    } else {
        Err(Error::invalid("value", "Rating must be between 1 and 5"))
    }
}
