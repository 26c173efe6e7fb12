//! In-memory broker for development and tests.
//!
//! Messages are assigned sequential broker ids per topic and dropped once
//! accepted. A recording factory keeps every accepted envelope for
//! inspection. In [`AckMode::Manual`] acknowledgements are held until the
//! test releases them, which makes asynchronous completion observable.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::foundation::{BrokerMessageId, DomainError};
use crate::domain::publish::{Envelope, PublishFailure, SubmitError};
use crate::ports::{PublishFuture, PublisherFactory, TopicPublisher};

/// When submitted messages are acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AckMode {
    /// Acknowledge as soon as the message is stored.
    #[default]
    Immediate,
    /// Hold acknowledgements until `acknowledge_next` / `fail_next`.
    Manual,
}

type PendingAck = (BrokerMessageId, oneshot::Sender<Result<BrokerMessageId, PublishFailure>>);

/// Publisher handle storing envelopes in memory.
pub struct InMemoryPublisher {
    topic: String,
    max_message_bytes: usize,
    mode: AckMode,
    next_id: AtomicU64,
    closed: AtomicBool,
    accepted: AtomicU64,
    /// `Some` only for recording publishers.
    published: Option<Mutex<Vec<Envelope>>>,
    pending: Mutex<VecDeque<PendingAck>>,
}

impl InMemoryPublisher {
    pub fn new(topic: impl Into<String>, max_message_bytes: usize, mode: AckMode) -> Self {
        Self {
            topic: topic.into(),
            max_message_bytes,
            mode,
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
            accepted: AtomicU64::new(0),
            published: None,
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Keeps a copy of every accepted envelope.
    pub fn recording(mut self) -> Self {
        self.published = Some(Mutex::new(Vec::new()));
        self
    }

    // === Test Helpers ===

    /// Envelopes accepted so far, in submission order. Always empty unless
    /// the publisher is recording.
    pub fn published(&self) -> Vec<Envelope> {
        self.published
            .as_ref()
            .map(|published| {
                published
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone()
            })
            .unwrap_or_default()
    }

    /// Number of envelopes accepted, recording or not.
    pub fn published_count(&self) -> usize {
        self.accepted.load(Ordering::SeqCst) as usize
    }

    /// Number of submissions waiting for a manual acknowledgement.
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Acknowledges the oldest pending submission. Returns its broker id.
    pub fn acknowledge_next(&self) -> Option<BrokerMessageId> {
        let (id, tx) = self.pop_pending()?;
        let _ = tx.send(Ok(id.clone()));
        Some(id)
    }

    /// Fails the oldest pending submission with `failure`.
    pub fn fail_next(&self, failure: PublishFailure) -> Option<BrokerMessageId> {
        let (id, tx) = self.pop_pending()?;
        let _ = tx.send(Err(failure));
        Some(id)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn pop_pending(&self) -> Option<PendingAck> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

#[async_trait]
impl TopicPublisher for InMemoryPublisher {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn publish(&self, envelope: Envelope) -> Result<PublishFuture, SubmitError> {
        if self.is_closed() {
            return Err(SubmitError::Closed(self.topic.clone()));
        }
        let size = envelope.size_bytes();
        if size > self.max_message_bytes {
            return Err(SubmitError::TooLarge {
                size,
                limit: self.max_message_bytes,
            });
        }

        let id = BrokerMessageId::new(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
        self.accepted.fetch_add(1, Ordering::SeqCst);
        if let Some(published) = &self.published {
            published
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(envelope);
        }

        match self.mode {
            AckMode::Immediate => Ok(PublishFuture::ready(Ok(id))),
            AckMode::Manual => {
                let (tx, rx) = oneshot::channel();
                self.pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push_back((id, tx));
                Ok(PublishFuture::new(async move {
                    rx.await.unwrap_or(Err(PublishFailure::Closed))
                }))
            }
        }
    }

    async fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Factory creating one [`InMemoryPublisher`] per topic.
///
/// Keeps every created publisher so tests can inspect what reached the
/// "broker". Envelope contents are only kept by [`Self::recording`]
/// factories.
pub struct InMemoryPublisherFactory {
    max_message_bytes: usize,
    mode: AckMode,
    record: bool,
    created: Mutex<HashMap<String, Arc<InMemoryPublisher>>>,
    creations: AtomicU64,
}

impl InMemoryPublisherFactory {
    pub fn new(max_message_bytes: usize) -> Self {
        Self {
            max_message_bytes,
            mode: AckMode::Immediate,
            record: false,
            created: Mutex::new(HashMap::new()),
            creations: AtomicU64::new(0),
        }
    }

    /// A factory whose publishers keep every accepted envelope.
    pub fn recording(max_message_bytes: usize) -> Self {
        Self {
            record: true,
            ..Self::new(max_message_bytes)
        }
    }

    pub fn with_ack_mode(mut self, mode: AckMode) -> Self {
        self.mode = mode;
        self
    }

    /// The publisher created for `topic`, if any.
    pub fn publisher(&self, topic: &str) -> Option<Arc<InMemoryPublisher>> {
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .cloned()
    }

    /// Total number of `create` calls served.
    pub fn creation_count(&self) -> u64 {
        self.creations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublisherFactory for InMemoryPublisherFactory {
    async fn create(&self, topic: &str) -> Result<Arc<dyn TopicPublisher>, DomainError> {
        let mut publisher = InMemoryPublisher::new(topic, self.max_message_bytes, self.mode);
        if self.record {
            publisher = publisher.recording();
        }
        let publisher = Arc::new(publisher);
        self.creations.fetch_add(1, Ordering::SeqCst);
        self.created
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(topic.to_string(), Arc::clone(&publisher));
        Ok(publisher as Arc<dyn TopicPublisher>)
    }
}
