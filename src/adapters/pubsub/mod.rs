//! Broker adapters.
//!
//! Adapters implement the publisher ports for different environments:
//!
//! - `InMemoryPublisherFactory` - In-process broker for development and tests
//! - `RedisPublisherFactory` - Redis Streams broker for production
//! - `TracingOutcomeListener` - Logs and counts publish outcomes

mod in_memory;
mod redis_streams;
mod tracing_listener;

pub use in_memory::{AckMode, InMemoryPublisher, InMemoryPublisherFactory};
pub use redis_streams::{
    stream_fields, RedisPublisherFactory, RedisPublisherSettings, RedisStreamPublisher,
    ATTRIBUTE_FIELD_PREFIX,
};
pub use tracing_listener::{OutcomeStats, TracingOutcomeListener};
