//! HTTP routes for publish endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, publish_messages, PublishAppState};

/// Creates the publish router, mounted under `/api`.
pub fn publish_routes(state: PublishAppState) -> Router {
    Router::new()
        .route("/publish", post(publish_messages))
        .with_state(state)
}

/// Creates the health router, mounted at the root.
pub fn health_routes(state: PublishAppState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}
