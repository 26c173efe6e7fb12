//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `http` - Inbound REST API (axum)
//! - `pubsub` - Broker publishers (in-memory, Redis Streams) and outcome logging

pub mod http;
pub mod pubsub;

pub use http::{app_router, PublishAppState};
pub use pubsub::{InMemoryPublisherFactory, RedisPublisherFactory, TracingOutcomeListener};
