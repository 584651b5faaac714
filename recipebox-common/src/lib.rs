//! # Recipebox Common Library
//!
//! Shared recipe-collection core used by the recipebox server and clients:
//! - Entity model (recipes, comments, ratings)
//! - In-memory collection store
//! - Query engine (filter, search, sort)
//! - Mutation service (author-gated writes, rating upsert)
//! - Presentation adapter and the local favorites cache
//! - Configuration loading and error types

pub mod config;
pub mod error;
pub mod favorites;
pub mod identity;
pub mod models;
pub mod mutation;
pub mod presentation;
pub mod query;
pub mod seed;
pub mod store;
pub mod time;
pub mod uuid_utils;
pub mod validation;

pub use error::{Error, FieldError, Result};
pub use identity::Identity;
pub use models::{Comment, Difficulty, Rating, Recipe, RecipeId};
pub use mutation::RecipeService;
pub use query::{RecipeQuery, SortOrder};
pub use store::{RecipeCollection, RecipeStore};
