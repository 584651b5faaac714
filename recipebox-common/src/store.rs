//! In-memory recipe collection store
//!
//! `RecipeCollection` is the plain ordered collection (insertion order).
//! `RecipeStore` wraps it in a `tokio::sync::RwLock` so it can be shared
//! between concurrently running request handlers.

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::models::{Recipe, RecipeId};
use crate::{uuid_utils, Error, Result};

/// Ordered collection of recipes with unique ids
#[derive(Debug, Default, Clone)]
pub struct RecipeCollection {
    recipes: Vec<Recipe>,
}

impl RecipeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection by inserting each recipe in order
    ///
    /// Incoming ids are discarded; every recipe gets a fresh one.
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut collection = Self::new();
        for recipe in recipes {
            collection.insert(recipe);
        }
        collection
    }

    /// Append a recipe under a freshly generated id
    pub fn insert(&mut self, mut recipe: Recipe) -> &Recipe {
        recipe.id = uuid_utils::generate_unique(|id| self.contains(id));
        debug!(recipe_id = %recipe.id, "Inserting recipe");
        self.recipes.push(recipe);
        // Just pushed, so the collection is non-empty
        &self.recipes[self.recipes.len() - 1]
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.position(id).is_some()
    }

    pub fn find(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == *id)
    }

    pub fn find_mut(&mut self, id: &RecipeId) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.id == *id)
    }

    /// Like `find`, but absence is an error
    pub fn get(&self, id: &RecipeId) -> Result<&Recipe> {
        self.find(id).ok_or_else(|| not_found(id))
    }

    pub fn get_mut(&mut self, id: &RecipeId) -> Result<&mut Recipe> {
        self.find_mut(id).ok_or_else(|| not_found(id))
    }

    /// Substitute the recipe stored under `id`, returning the previous one
    ///
    /// The replacement always keeps `id`, whatever its own id field says.
    pub fn replace(&mut self, id: &RecipeId, mut recipe: Recipe) -> Result<Recipe> {
        let index = self.position(id).ok_or_else(|| not_found(id))?;
        recipe.id = *id;
        Ok(std::mem::replace(&mut self.recipes[index], recipe))
    }

    /// Remove the recipe stored under `id`
    pub fn delete(&mut self, id: &RecipeId) -> Result<Recipe> {
        let index = self.position(id).ok_or_else(|| not_found(id))?;
        Ok(self.recipes.remove(index))
    }

    /// All recipes in insertion order
    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    fn position(&self, id: &RecipeId) -> Option<usize> {
        self.recipes.iter().position(|r| r.id == *id)
    }
}

fn not_found(id: &RecipeId) -> Error {
    Error::NotFound(format!("Recipe not found: {}", id))
}

/// Shared recipe store
///
/// One writer at a time; readers run concurrently and copy what they need
/// out of the guard. Mutations hold the write guard across the whole
/// read-modify-write so concurrent writers cannot lose updates.
#[derive(Debug, Default)]
pub struct RecipeStore {
    collection: RwLock<RecipeCollection>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(collection: RecipeCollection) -> Self {
        Self {
            collection: RwLock::new(collection),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, RecipeCollection> {
        self.collection.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, RecipeCollection> {
        self.collection.write().await
    }

    /// Copy of every recipe in insertion order
    pub async fn snapshot(&self) -> Vec<Recipe> {
        self.read().await.all().to_vec()
    }

    /// Copy of one recipe
    pub async fn get(&self, id: &RecipeId) -> Result<Recipe> {
        self.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.read().await.is_empty()
    }
}
