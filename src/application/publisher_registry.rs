//! PublisherRegistry - per-topic cache of publisher handles.
//!
//! Handles are created lazily through a [`PublisherFactory`] and live until
//! [`PublisherRegistry::shutdown`]. Each topic owns a `OnceCell` slot: the
//! map lock is held only to find or insert the slot, and creation runs
//! under the slot, so topics never wait on each other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info};

use crate::domain::foundation::DomainError;
use crate::ports::{PublisherFactory, TopicPublisher};

type Slot = Arc<OnceCell<Arc<dyn TopicPublisher>>>;

/// Thread-safe topic -> publisher cache with create-on-miss.
pub struct PublisherRegistry {
    factory: Arc<dyn PublisherFactory>,
    slots: RwLock<HashMap<String, Slot>>,
}

impl PublisherRegistry {
    pub fn new(factory: Arc<dyn PublisherFactory>) -> Self {
        Self {
            factory,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the handle for `topic`, creating it on first use.
    ///
    /// Concurrent first calls for one topic share a single creation; at most
    /// one handle is ever stored per topic. A failed creation leaves the
    /// slot empty so a later call can retry.
    pub async fn get_or_create(&self, topic: &str) -> Result<Arc<dyn TopicPublisher>, DomainError> {
        let slot = self.slot(topic).await;

        if let Some(publisher) = slot.get() {
            return Ok(Arc::clone(publisher));
        }

        let publisher = slot
            .get_or_try_init(|| async {
                let publisher = self.factory.create(topic).await?;
                info!(topic = %topic, "Created publisher");
                Ok::<_, DomainError>(publisher)
            })
            .await?;

        Ok(Arc::clone(publisher))
    }

    /// Returns the handle for `topic` if one has been created.
    pub async fn get(&self, topic: &str) -> Option<Arc<dyn TopicPublisher>> {
        let slots = self.slots.read().await;
        slots.get(topic).and_then(|slot| slot.get().cloned())
    }

    /// Number of topics with a created handle.
    pub async fn len(&self) -> usize {
        let slots = self.slots.read().await;
        slots.values().filter(|slot| slot.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Topics with a created handle, sorted.
    pub async fn topics(&self) -> Vec<String> {
        let slots = self.slots.read().await;
        let mut topics: Vec<String> = slots
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(topic, _)| topic.clone())
            .collect();
        topics.sort();
        topics
    }

    /// Shuts down every created handle.
    ///
    /// Handles stay cached; later submissions to them are refused by the
    /// handle itself.
    pub async fn shutdown(&self) {
        let publishers: Vec<Arc<dyn TopicPublisher>> = {
            let slots = self.slots.read().await;
            slots.values().filter_map(|slot| slot.get().cloned()).collect()
        };

        for publisher in publishers {
            debug!(topic = %publisher.topic(), "Shutting down publisher");
            publisher.shutdown().await;
        }
    }

    async fn slot(&self, topic: &str) -> Slot {
        let existing = self.slots.read().await.get(topic).cloned();
        match existing {
            Some(slot) => slot,
            None => {
                let mut slots = self.slots.write().await;
                Arc::clone(
                    slots
                        .entry(topic.to_string())
                        .or_insert_with(|| Arc::new(OnceCell::new())),
                )
            }
        }
    }
}
