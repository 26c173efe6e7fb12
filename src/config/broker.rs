//! Broker selection and publisher limits

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which broker publishers talk to
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrokerBackend {
    /// In-process broker, nothing leaves the process
    #[default]
    Memory,
    /// Redis Streams, one stream per topic
    Redis,
}

/// `broker` section. The `redis_*` settings are only read by the Redis
/// backend and only validated when it is selected.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub backend: BrokerBackend,

    /// Largest envelope (payload plus attributes) a publisher accepts
    pub max_message_bytes: usize,

    /// How long a submitted message may wait for its acknowledgement
    pub ack_timeout_secs: u64,

    /// `redis://` or `rediss://` URL
    pub redis_url: String,

    /// Prepended to the topic to form the stream key
    pub stream_prefix: String,

    /// Bound on opening the shared Redis connection
    pub connect_timeout_secs: u64,
}

impl BrokerConfig {
    pub fn ack_timeout(&self) -> Duration {
        Duration::from_secs(self.ack_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_message_bytes == 0 {
            return Err(ValidationError::InvalidMessageLimit);
        }
        if self.ack_timeout_secs == 0 {
            return Err(ValidationError::InvalidAckTimeout);
        }
        match self.backend {
            BrokerBackend::Memory => Ok(()),
            BrokerBackend::Redis => self.validate_redis(),
        }
    }

    fn validate_redis(&self) -> Result<(), ValidationError> {
        if self.redis_url.is_empty() {
            return Err(ValidationError::MissingRequired("BROKER__REDIS_URL"));
        }
        if !["redis://", "rediss://"]
            .iter()
            .any(|scheme| self.redis_url.starts_with(scheme))
        {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.connect_timeout_secs == 0 {
            return Err(ValidationError::InvalidConnectTimeout);
        }
        Ok(())
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            backend: BrokerBackend::Memory,
            max_message_bytes: 10_000_000,
            ack_timeout_secs: 30,
            redis_url: String::new(),
            stream_prefix: "pubsub:".to_string(),
            connect_timeout_secs: 5,
        }
    }
}
