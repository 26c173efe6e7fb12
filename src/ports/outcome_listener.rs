//! PublishOutcomeListener port - completion callbacks for submitted messages.

use crate::domain::foundation::BrokerMessageId;
use crate::domain::publish::{PublishContext, PublishFailure};

/// Receives the outcome of each submitted message.
///
/// For every submission exactly one of the two methods is called, exactly
/// once, on the completion executor. Calls for different messages may run
/// concurrently and in any order.
pub trait PublishOutcomeListener: Send + Sync {
    fn on_success(&self, context: &PublishContext, broker_id: &BrokerMessageId);

    fn on_failure(&self, context: &PublishContext, failure: &PublishFailure);
}
