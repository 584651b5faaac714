//! Local favorites cache
//!
//! Favorites are per client profile and never synced to the server. The
//! set is loaded once through a backend and saved back on every change.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::models::RecipeId;
use crate::{Error, Result};

/// Anything that can answer "is this recipe a favorite?"
pub trait FavoriteSet {
    fn is_favorite(&self, id: &RecipeId) -> bool;
}

impl FavoriteSet for HashSet<RecipeId> {
    fn is_favorite(&self, id: &RecipeId) -> bool {
        self.contains(id)
    }
}

impl FavoriteSet for [RecipeId] {
    fn is_favorite(&self, id: &RecipeId) -> bool {
        self.contains(id)
    }
}

/// Persistence hooks for the favorites list
pub trait FavoritesBackend {
    fn load(&self) -> Result<Vec<RecipeId>>;
    fn save(&self, ids: &[RecipeId]) -> Result<()>;
}

/// Volatile backend; clones share the same storage
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    ids: Arc<Mutex<Vec<RecipeId>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: Vec<RecipeId>) -> Self {
        Self {
            ids: Arc::new(Mutex::new(ids)),
        }
    }

    /// What was last saved
    pub fn saved(&self) -> Vec<RecipeId> {
        self.ids.lock().map(|ids| ids.clone()).unwrap_or_default()
    }
}

impl FavoritesBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<RecipeId>> {
        self.ids
            .lock()
            .map(|ids| ids.clone())
            .map_err(|_| Error::Internal("favorites lock poisoned".to_string()))
    }

    fn save(&self, ids: &[RecipeId]) -> Result<()> {
        let mut stored = self
            .ids
            .lock()
            .map_err(|_| Error::Internal("favorites lock poisoned".to_string()))?;
        *stored = ids.to_vec();
        Ok(())
    }
}

/// JSON array of recipe ids stored in a file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesBackend for JsonFileBackend {
    /// Missing file loads as empty; a corrupt file is logged and loads as empty
    fn load(&self) -> Result<Vec<RecipeId>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                warn!(
                    "Failed to parse favorites from {}: {} (starting empty)",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Atomic write: temp file in the same directory, then rename
    fn save(&self, ids: &[RecipeId]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, serde_json::to_string(ids)?)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

/// Ordered favorites set backed by a persistence hook
#[derive(Debug)]
pub struct Favorites<B: FavoritesBackend> {
    backend: B,
    ids: Vec<RecipeId>,
}

impl<B: FavoritesBackend> Favorites<B> {
    /// Load the saved set (duplicates in storage are collapsed)
    pub fn load(backend: B) -> Result<Self> {
        let mut ids: Vec<RecipeId> = Vec::new();
        for id in backend.load()? {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        debug!(count = ids.len(), "Loaded favorites");
        Ok(Self { backend, ids })
    }

    /// Flip membership; returns the new state (true = now a favorite)
    pub fn toggle(&mut self, id: RecipeId) -> Result<bool> {
        if self.contains(&id) {
            self.remove(&id)?;
            Ok(false)
        } else {
            self.add(id)?;
            Ok(true)
        }
    }

    /// Returns false if already present (nothing saved)
    pub fn add(&mut self, id: RecipeId) -> Result<bool> {
        if self.contains(&id) {
            return Ok(false);
        }
        let mut next = self.ids.clone();
        next.push(id);
        self.commit(next)?;
        Ok(true)
    }

    /// Returns false if absent (nothing saved)
    pub fn remove(&mut self, id: &RecipeId) -> Result<bool> {
        if !self.contains(id) {
            return Ok(false);
        }
        let next = self
            .ids
            .iter()
            .filter(|existing| *existing != id)
            .copied()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Persist `next`, then adopt it; a failed save leaves the set unchanged
    fn commit(&mut self, next: Vec<RecipeId>) -> Result<()> {
        self.backend.save(&next)?;
        self.ids = next;
        Ok(())
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.ids.contains(id)
    }

    /// Favorites in the order they were added
    pub fn ids(&self) -> &[RecipeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<B: FavoritesBackend> FavoriteSet for Favorites<B> {
    fn is_favorite(&self, id: &RecipeId) -> bool {
        self.contains(id)
    }
}
