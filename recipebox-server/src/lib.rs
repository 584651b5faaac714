//! recipebox-server library - REST API over the recipe core
//!
//! Serves the recipe collection (list/get/create/update/delete, comments,
//! ratings) plus image uploads, backed by an in-memory store.

use std::sync::Arc;

use axum::Router;
use recipebox_common::config::ServerConfig;
use recipebox_common::{RecipeService, RecipeStore};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod extract;
pub mod identity;
pub mod images;

use images::ImageStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Recipe queries and mutations
    pub service: RecipeService,
    /// Uploaded image storage
    pub images: Arc<ImageStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(service: RecipeService, images: ImageStore) -> Self {
        Self {
            service,
            images: Arc::new(images),
        }
    }

    /// State over `store`, with limits and categories from `config`
    pub fn from_config(config: &ServerConfig, store: RecipeStore) -> Self {
        let service = RecipeService::new(Arc::new(store), config.validation_rules());
        let images = ImageStore::new(config.uploads_dir.clone(), config.max_upload_bytes);
        Self::new(service, images)
    }
}

/// Build application router
///
/// Reads are open to anonymous callers; writes need an identity, which the
/// handlers check through the recipe service.
pub fn build_router(state: AppState) -> Router {
    use axum::extract::DefaultBodyLimit;
    use axum::routing::{get, post};

    let upload_limit = state.images.max_bytes();
    let uploads_dir = state.images.dir().to_path_buf();

    let recipes = Router::new()
        .route(
            "/api/recipes",
            get(api::list_recipes).post(api::create_recipe),
        )
        .route(
            "/api/recipes/:id",
            get(api::get_recipe)
                .put(api::update_recipe)
                .delete(api::delete_recipe),
        )
        .route("/api/recipes/:id/comments", post(api::add_comment))
        .route("/api/recipes/:id/ratings", post(api::add_rating))
        .route(
            "/api/uploads",
            post(api::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        );

    Router::new()
        .merge(recipes)
        .merge(api::health_routes())
        .nest_service(images::URL_PREFIX, ServeDir::new(uploads_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
