//! API handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::{ApiError, AppState};
use crate::posts;
use crate::types::Article;

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// List all posts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Article>>, ApiError> {
    let posts = posts::list_posts(&state.service, state.clients.as_ref()).await?;
    Ok(Json(posts))
}
