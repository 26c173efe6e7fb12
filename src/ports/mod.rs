//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Broker Ports
//!
//! - `TopicPublisher` - Per-topic handle submitting envelopes asynchronously
//! - `PublishFuture` - Pending acknowledgement with listener registration
//! - `PublisherFactory` - Creates a handle for a topic on first use
//!
//! ## Completion Ports
//!
//! - `PublishOutcomeListener` - Success/failure callbacks per message

mod outcome_listener;
mod publisher_factory;
mod topic_publisher;

pub use outcome_listener::PublishOutcomeListener;
pub use publisher_factory::PublisherFactory;
pub use topic_publisher::{PublishFuture, TopicPublisher};
