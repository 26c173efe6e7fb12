//! Application layer - Handlers and the publisher registry.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod publisher_registry;

pub use handlers::{PublishMessagesHandler, PublishReceipt};
pub use publisher_registry::PublisherRegistry;
