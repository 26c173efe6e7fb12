//! Redis Streams broker adapter for production deployments.
//!
//! Each topic maps to one stream (`<prefix><topic>`). A message becomes one
//! `XADD` entry; the entry id Redis assigns is the broker message id.
//!
//! Entry fields:
//! - `data` - payload bytes
//! - `message_id` - client-supplied id
//! - `publish_time` - RFC3339, UTC
//! - `attr.<key>` - one field per attribute

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::runtime::Handle;
use tokio::sync::OnceCell;
use tracing::{debug, error};

use crate::domain::foundation::{BrokerMessageId, DomainError, ErrorCode};
use crate::domain::publish::{Envelope, PublishFailure, SubmitError};
use crate::ports::{PublishFuture, PublisherFactory, TopicPublisher};

/// Field prefix for message attributes.
pub const ATTRIBUTE_FIELD_PREFIX: &str = "attr.";

/// Settings shared by every Redis stream publisher.
#[derive(Debug, Clone)]
pub struct RedisPublisherSettings {
    pub stream_prefix: String,
    pub max_message_bytes: usize,
    pub ack_timeout: Duration,
}

/// Publisher handle appending to one Redis stream.
pub struct RedisStreamPublisher {
    topic: String,
    stream_key: String,
    conn: MultiplexedConnection,
    settings: RedisPublisherSettings,
    runtime: Handle,
    closed: AtomicBool,
}

impl RedisStreamPublisher {
    pub fn new(
        topic: impl Into<String>,
        conn: MultiplexedConnection,
        settings: RedisPublisherSettings,
        runtime: Handle,
    ) -> Self {
        let topic = topic.into();
        Self {
            stream_key: format!("{}{}", settings.stream_prefix, topic),
            topic,
            conn,
            settings,
            runtime,
            closed: AtomicBool::new(false),
        }
    }

    pub fn stream_key(&self) -> &str {
        &self.stream_key
    }
}

/// Flattens an envelope into stream entry fields.
pub fn stream_fields(envelope: &Envelope) -> Vec<(String, Vec<u8>)> {
    let mut fields = Vec::with_capacity(3 + envelope.attributes.len());
    fields.push(("data".to_string(), envelope.data.clone()));
    fields.push((
        "message_id".to_string(),
        envelope.message_id.as_bytes().to_vec(),
    ));
    fields.push((
        "publish_time".to_string(),
        envelope.publish_time.to_rfc3339().into_bytes(),
    ));
    for (key, value) in envelope.attributes.iter() {
        fields.push((
            format!("{}{}", ATTRIBUTE_FIELD_PREFIX, key),
            value.as_bytes().to_vec(),
        ));
    }
    fields
}

#[async_trait]
impl TopicPublisher for RedisStreamPublisher {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn publish(&self, envelope: Envelope) -> Result<PublishFuture, SubmitError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SubmitError::Closed(self.topic.clone()));
        }
        let size = envelope.size_bytes();
        if size > self.settings.max_message_bytes {
            return Err(SubmitError::TooLarge {
                size,
                limit: self.settings.max_message_bytes,
            });
        }

        let fields = stream_fields(&envelope);
        let stream_key = self.stream_key.clone();
        let ack_timeout = self.settings.ack_timeout;
        let mut conn = self.conn.clone();

        // Started now; the returned future only observes the result.
        let task = self.runtime.spawn(async move {
            let append = async {
                let id: String = conn.xadd(&stream_key, "*", fields.as_slice()).await?;
                Ok::<_, redis::RedisError>(id)
            };

            match tokio::time::timeout(ack_timeout, append).await {
                Ok(Ok(id)) => {
                    debug!(stream = %stream_key, broker_id = %id, "XADD acknowledged");
                    Ok(BrokerMessageId::new(id))
                }
                Ok(Err(e)) => Err(PublishFailure::broker(
                    e.code().unwrap_or("IO_ERROR"),
                    e.to_string(),
                )),
                Err(_) => Err(PublishFailure::Timeout(ack_timeout)),
            }
        });

        Ok(PublishFuture::new(async move {
            task.await.unwrap_or_else(|e| {
                error!("Redis publish task failed: {}", e);
                Err(PublishFailure::Closed)
            })
        }))
    }

    async fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Factory creating Redis stream publishers over one shared connection.
///
/// The multiplexed connection is opened on the first `create` call and
/// reused for every topic afterwards.
pub struct RedisPublisherFactory {
    client: redis::Client,
    conn: OnceCell<MultiplexedConnection>,
    settings: RedisPublisherSettings,
    connect_timeout: Duration,
}

impl RedisPublisherFactory {
    pub fn new(
        url: &str,
        settings: RedisPublisherSettings,
        connect_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = redis::Client::open(url).map_err(|e| {
            DomainError::new(
                ErrorCode::ConfigurationError,
                format!("Invalid Redis URL: {}", e),
            )
        })?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
            settings,
            connect_timeout,
        })
    }

    async fn connection(&self, topic: &str) -> Result<MultiplexedConnection, DomainError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let connect = self.client.get_multiplexed_async_connection();
                match tokio::time::timeout(self.connect_timeout, connect).await {
                    Ok(Ok(conn)) => Ok(conn),
                    Ok(Err(e)) => Err(DomainError::publisher_unavailable(
                        topic,
                        format!("Redis connection failed: {}", e),
                    )),
                    Err(_) => Err(DomainError::publisher_unavailable(
                        topic,
                        "Redis connection timed out",
                    )),
                }
            })
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl PublisherFactory for RedisPublisherFactory {
    async fn create(&self, topic: &str) -> Result<Arc<dyn TopicPublisher>, DomainError> {
        let conn = self.connection(topic).await?;
        let publisher = RedisStreamPublisher::new(
            topic,
            conn,
            self.settings.clone(),
            Handle::current(),
        );
        debug!(topic = %topic, stream = %publisher.stream_key(), "Redis stream publisher ready");
        Ok(Arc::new(publisher) as Arc<dyn TopicPublisher>)
    }
}
