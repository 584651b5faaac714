//! GET /health: liveness plus a cheap look at what the server holds

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Recipes currently in the collection
    pub recipe_count: usize,
    /// Whether the uploads directory exists and can be served from
    pub uploads_ready: bool,
}

/// Open to anonymous callers
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let recipe_count = state.service.store().len().await;
    let uploads_ready = tokio::fs::metadata(state.images.dir())
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    Json(HealthStatus {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        recipe_count,
        uploads_ready,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
