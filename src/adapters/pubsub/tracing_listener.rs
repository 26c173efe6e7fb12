//! Outcome listener that logs every completion and keeps running totals.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::foundation::BrokerMessageId;
use crate::domain::publish::{PublishContext, PublishFailure};
use crate::ports::PublishOutcomeListener;

/// Snapshot of completion totals since startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OutcomeStats {
    pub acknowledged: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
pub struct TracingOutcomeListener {
    acknowledged: AtomicU64,
    failed: AtomicU64,
}

impl TracingOutcomeListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> OutcomeStats {
        OutcomeStats {
            acknowledged: self.acknowledged.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

impl PublishOutcomeListener for TracingOutcomeListener {
    fn on_success(&self, context: &PublishContext, broker_id: &BrokerMessageId) {
        self.acknowledged.fetch_add(1, Ordering::Relaxed);
        info!(
            request_id = %context.request_id,
            topic = %context.topic,
            message_id = %context.message_id,
            broker_id = %broker_id,
            "Message published"
        );
    }

    fn on_failure(&self, context: &PublishContext, failure: &PublishFailure) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        warn!(
            request_id = %context.request_id,
            topic = %context.topic,
            message_id = %context.message_id,
            "Failed to publish message: {}",
            failure
        );
    }
}
