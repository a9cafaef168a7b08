//! HTTP API server

use axum::{routing::get, Router};
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

use crate::config::ServiceConfig;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest(
            "/api",
            Router::new().route("/posts", get(handlers::list_posts)),
        )
        // Failed requests are reported by the handlers themselves.
        .layer(
            TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::WARN)),
        )
        .with_state(state)
}

/// Convenience helper for the REST-backed deployment
pub fn create_rest_router(service: ServiceConfig) -> Router {
    create_router(AppState::rest(service))
}
