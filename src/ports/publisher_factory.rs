//! PublisherFactory port - constructs publisher handles for topics.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

use super::TopicPublisher;

/// Port for creating a publisher bound to a topic.
///
/// Called at most once per topic by the registry; implementations do not
/// need to cache.
#[async_trait]
pub trait PublisherFactory: Send + Sync {
    async fn create(&self, topic: &str) -> Result<Arc<dyn TopicPublisher>, DomainError>;
}
