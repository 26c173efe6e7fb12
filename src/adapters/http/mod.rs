//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the publish and health endpoints behind the
//! shared request-id, tracing and timeout layers.

pub mod publish;

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use publish::{health_routes, publish_routes, PublishAppState};

/// Creates the full application router.
///
/// - `POST /api/publish`
/// - `GET /health`
pub fn app_router(state: PublishAppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api", publish_routes(state.clone()))
        .merge(health_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
