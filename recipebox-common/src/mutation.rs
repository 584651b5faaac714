//! Recipe service: reads through the query engine and author-gated writes
//!
//! Every write runs under the store's write guard from lookup to write-back,
//! so a check (existence, authorship) and the change it guards are atomic.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::identity::{ActingUser, Identity};
use crate::models::{Comment, Recipe, RecipeId};
use crate::query::RecipeQuery;
use crate::store::RecipeStore;
use crate::validation::{
    validate_comment_text, validate_draft, validate_patch, validate_rating_value, RecipeDraft,
    RecipePatch, ValidationRules,
};
use crate::{time, uuid_utils, Error, Result};

/// Query and mutation operations over a shared `RecipeStore`
#[derive(Debug, Clone)]
pub struct RecipeService {
    store: Arc<RecipeStore>,
    rules: ValidationRules,
}

impl RecipeService {
    pub fn new(store: Arc<RecipeStore>, rules: ValidationRules) -> Self {
        Self { store, rules }
    }

    pub fn store(&self) -> &Arc<RecipeStore> {
        &self.store
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    // ------------------------------------------------------------------
    // Reads (identity optional)
    // ------------------------------------------------------------------

    /// Filtered, searched and sorted copy of the collection
    pub async fn list(&self, query: &RecipeQuery) -> Vec<Recipe> {
        let collection = self.store.read().await;
        let results = query.apply(collection.all());
        debug!(
            category = ?query.category,
            search = ?query.search,
            sort = ?query.sort,
            total = collection.len(),
            matched = results.len(),
            "Recipe query"
        );
        results
    }

    pub async fn get(&self, id: &RecipeId) -> Result<Recipe> {
        self.store.get(id).await
    }

    // ------------------------------------------------------------------
    // Writes (identity required)
    // ------------------------------------------------------------------

    /// Validate and insert a new recipe authored by `identity`
    pub async fn create(&self, draft: &RecipeDraft, identity: &Identity) -> Result<Recipe> {
        let acting = identity.require()?;
        let valid = validate_draft(draft, &self.rules).inspect_err(|e| {
            debug!(user_id = %acting.user_id, error = %e, "Rejected recipe creation");
        })?;

        let now = time::now();
        let recipe = Recipe {
            // Assigned by the collection on insert
            id: RecipeId::nil(),
            title: valid.title,
            description: valid.description,
            image_url: valid.image.into_reference(),
            ingredients: valid.ingredients,
            instructions: valid.instructions,
            category: valid.category,
            prep_time: valid.prep_time,
            cook_time: valid.cook_time,
            servings: valid.servings,
            difficulty: valid.difficulty,
            author_id: acting.user_id.to_string(),
            author_name: acting.author_name(),
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
            ratings: Vec::new(),
            tags: valid.tags,
        };

        let created = self.store.write().await.insert(recipe).clone();
        info!(recipe_id = %created.id, user_id = %acting.user_id, title = %created.title, "Recipe created");
        Ok(created)
    }

    /// Merge validated changes into a recipe owned by `identity`
    pub async fn update(
        &self,
        id: &RecipeId,
        patch: &RecipePatch,
        identity: &Identity,
    ) -> Result<Recipe> {
        let acting = identity.require()?;
        let mut collection = self.store.write().await;

        let existing = collection.get(id)?;
        ensure_author(existing, &acting, "edit")?;
        let valid = validate_patch(patch, &self.rules)?;

        let mut updated = existing.clone();
        valid.apply_to(&mut updated);
        updated.updated_at = time::now();

        collection.replace(id, updated.clone())?;
        info!(recipe_id = %id, user_id = %acting.user_id, "Recipe updated");
        Ok(updated)
    }

    /// Remove a recipe owned by `identity`
    pub async fn delete(&self, id: &RecipeId, identity: &Identity) -> Result<()> {
        let acting = identity.require()?;
        let mut collection = self.store.write().await;

        ensure_author(collection.get(id)?, &acting, "delete")?;
        collection.delete(id)?;
        info!(recipe_id = %id, user_id = %acting.user_id, "Recipe deleted");
        Ok(())
    }

    /// Append a comment by `identity`; authorship of the recipe is not required
    pub async fn add_comment(
        &self,
        id: &RecipeId,
        text: &str,
        identity: &Identity,
    ) -> Result<Comment> {
        let acting = identity.require()?;
        let mut collection = self.store.write().await;

        let recipe = collection.get_mut(id)?;
        let text = validate_comment_text(text)?;

        let comment = Comment {
            id: uuid_utils::generate_unique(|cid| recipe.comments.iter().any(|c| c.id == *cid)),
            author_id: acting.user_id.to_string(),
            author_name: acting.author_name(),
            text,
            created_at: time::now(),
        };
        recipe.comments.push(comment.clone());

        info!(recipe_id = %id, comment_id = %comment.id, user_id = %acting.user_id, "Comment added");
        Ok(comment)
    }

    /// Insert or replace `identity`'s rating; returns the whole recipe
    ///
    /// Ratings do not refresh `updatedAt`.
    pub async fn add_rating(&self, id: &RecipeId, value: i64, identity: &Identity) -> Result<Recipe> {
        let acting = identity.require()?;
        let mut collection = self.store.write().await;

        let recipe = collection.get_mut(id)?;
        let value = validate_rating_value(value)?;

        let replaced = recipe.upsert_rating(acting.user_id, value);
        info!(
            recipe_id = %id,
            user_id = %acting.user_id,
            value,
            replaced,
            "Rating recorded"
        );
        Ok(recipe.clone())
    }
}

fn ensure_author(recipe: &Recipe, acting: &ActingUser<'_>, action: &str) -> Result<()> {
    if recipe.author_id == acting.user_id {
        Ok(())
    } else {
        warn!(
            recipe_id = %recipe.id,
            user_id = %acting.user_id,
            action,
            "Rejected write by non-author"
        );
        Err(Error::Forbidden(format!(
            "Only the author can {} this recipe",
            action
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn service() -> RecipeService {
        RecipeService::new(Arc::new(RecipeStore::new()), ValidationRules::default())
    }

    fn alice() -> Identity {
        Identity::authenticated("alice", "Alice")
    }

    fn bob() -> Identity {
        Identity::authenticated("bob", "Bob")
    }

    fn draft() -> RecipeDraft {
        RecipeDraft {
            title: "Fudgy Brownies".to_string(),
            description: "Intensely chocolatey and moist".to_string(),
            image_url: Some("https://example.com/brownies.jpg".to_string()),
            ingredients: vec!["butter".to_string(), "cocoa".to_string()],
            instructions: vec!["Mix".to_string(), "Bake".to_string()],
            category: "Dessert".to_string(),
            prep_time: Some(15),
            cook_time: Some(25),
            servings: Some(9),
            difficulty: Some("Easy".to_string()),
            tags: Some(vec!["Chocolate".to_string()]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_stamps_author_and_timestamps() {
        let svc = service();
        let recipe = svc.create(&draft(), &alice()).await.unwrap();

        assert_eq!(recipe.author_id, "alice");
        assert_eq!(recipe.author_name, "Alice");
        assert_eq!(recipe.created_at, recipe.updated_at);
        assert!(recipe.comments.is_empty());
        assert!(recipe.ratings.is_empty());
        assert_eq!(recipe.difficulty, Some(Difficulty::Easy));
        assert_eq!(svc.get(&recipe.id).await.unwrap(), recipe);
    }

    #[tokio::test]
    async fn test_create_requires_identity() {
        let svc = service();
        let err = svc.create(&draft(), &Identity::Anonymous).await.unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));
        assert!(svc.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_create_without_image() {
        let svc = service();
        let mut d = draft();
        d.image_url = None;
        assert!(matches!(
            svc.create(&d, &alice()).await,
            Err(Error::ImageMissing)
        ));
        assert!(svc.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_update_merges_and_refreshes_updated_at() {
        let svc = service();
        let original = svc.create(&draft(), &alice()).await.unwrap();

        let patch = RecipePatch {
            title: Some("Fudgier Brownies".to_string()),
            cook_time: Some(None),
            ..Default::default()
        };
        let updated = svc.update(&original.id, &patch, &alice()).await.unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "Fudgier Brownies");
        assert_eq!(updated.cook_time, None);
        assert_eq!(updated.prep_time, Some(15));
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.image_url, original.image_url);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(svc.get(&original.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_by_non_author_is_forbidden() {
        let svc = service();
        let original = svc.create(&draft(), &alice()).await.unwrap();

        let patch = RecipePatch {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };
        let err = svc.update(&original.id, &patch, &bob()).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        assert_eq!(svc.get(&original.id).await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_update_invalid_field_leaves_recipe_unchanged() {
        let svc = service();
        let original = svc.create(&draft(), &alice()).await.unwrap();

        let patch = RecipePatch {
            title: Some("New title".to_string()),
            ingredients: Some(vec![]),
            ..Default::default()
        };
        let err = svc.update(&original.id, &patch, &alice()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(svc.get(&original.id).await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_update_missing_recipe() {
        let svc = service();
        let err = svc
            .update(&RecipeId::new_v4(), &RecipePatch::default(), &alice())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_author_only() {
        let svc = service();
        let recipe = svc.create(&draft(), &alice()).await.unwrap();

        assert!(matches!(
            svc.delete(&recipe.id, &bob()).await,
            Err(Error::Forbidden(_))
        ));
        assert!(svc.get(&recipe.id).await.is_ok());

        svc.delete(&recipe.id, &alice()).await.unwrap();
        assert!(matches!(svc.get(&recipe.id).await, Err(Error::NotFound(_))));
        assert!(matches!(
            svc.delete(&recipe.id, &alice()).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_comment_by_any_user() {
        let svc = service();
        let recipe = svc.create(&draft(), &alice()).await.unwrap();

        let first = svc.add_comment(&recipe.id, "Delicious!", &bob()).await.unwrap();
        let second = svc.add_comment(&recipe.id, " Thanks ", &alice()).await.unwrap();

        assert_eq!(first.author_id, "bob");
        assert_eq!(second.text, "Thanks");
        assert_ne!(first.id, second.id);

        let stored = svc.get(&recipe.id).await.unwrap();
        assert_eq!(stored.comments, vec![first, second]);
        // Comments do not count as edits
        assert_eq!(stored.updated_at, recipe.updated_at);
    }

    #[tokio::test]
    async fn test_comment_on_missing_recipe() {
        let svc = service();
        let err = svc
            .add_comment(&RecipeId::new_v4(), "Hello", &bob())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_comment_text_validated() {
        let svc = service();
        let recipe = svc.create(&draft(), &alice()).await.unwrap();
        assert!(matches!(
            svc.add_comment(&recipe.id, "   ", &bob()).await,
            Err(Error::Validation(_))
        ));
        assert!(svc.get(&recipe.id).await.unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn test_rating_upsert() {
        let svc = service();
        let recipe = svc.create(&draft(), &alice()).await.unwrap();

        let after_first = svc.add_rating(&recipe.id, 2, &bob()).await.unwrap();
        assert_eq!(after_first.ratings.len(), 1);

        let after_second = svc.add_rating(&recipe.id, 5, &bob()).await.unwrap();
        assert_eq!(after_second.ratings.len(), 1);
        assert_eq!(after_second.rating_for("bob"), Some(5));
        assert_eq!(after_second.updated_at, recipe.updated_at);

        let with_alice = svc.add_rating(&recipe.id, 4, &alice()).await.unwrap();
        assert_eq!(with_alice.ratings.len(), 2);
        assert_eq!(with_alice.average_rating(), 4.5);
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let svc = service();
        let recipe = svc.create(&draft(), &alice()).await.unwrap();
        for value in [0, 6, -1] {
            assert!(matches!(
                svc.add_rating(&recipe.id, value, &bob()).await,
                Err(Error::Validation(_))
            ));
        }
        assert!(svc.get(&recipe.id).await.unwrap().ratings.is_empty());
    }
}
