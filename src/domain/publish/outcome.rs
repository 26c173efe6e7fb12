//! Results of individual message publish attempts.

use std::time::Duration;

use thiserror::Error;

use crate::domain::foundation::{BrokerMessageId, RequestId};

/// Synchronous refusal of a submission by a publisher handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("message of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("publisher for topic '{0}' is shut down")]
    Closed(String),
}

/// Failure reported by the broker after a message was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishFailure {
    #[error("broker error {code}: {message}")]
    Broker { code: String, message: String },

    #[error("no acknowledgement within {0:?}")]
    Timeout(Duration),

    #[error("publisher closed before acknowledging")]
    Closed,
}

impl PublishFailure {
    pub fn broker(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Broker {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Terminal state of one submitted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Acknowledged(BrokerMessageId),
    Failed(PublishFailure),
}

impl From<Result<BrokerMessageId, PublishFailure>> for PublishOutcome {
    fn from(result: Result<BrokerMessageId, PublishFailure>) -> Self {
        match result {
            Ok(id) => PublishOutcome::Acknowledged(id),
            Err(failure) => PublishOutcome::Failed(failure),
        }
    }
}

/// Identifies the message an outcome belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishContext {
    pub request_id: RequestId,
    pub topic: String,
    /// Position of the message in its request.
    pub index: usize,
    /// Client-supplied message id.
    pub message_id: String,
}
