//! PublishMessagesHandler - validates a publish request and dispatches its messages.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::PublisherRegistry;
use crate::domain::foundation::RequestId;
use crate::domain::publish::{
    build_envelope, validate_request, Envelope, PublishContext, PublishError, PublishOutcome,
    PublishRequest,
};
use crate::ports::PublishOutcomeListener;

/// Proof that every message of a request was submitted.
///
/// Holds the completion tasks so callers that care (tests, shutdown) can
/// wait for the callbacks; dropping the receipt leaves them running.
#[derive(Debug)]
pub struct PublishReceipt {
    pub request_id: RequestId,
    pub topic: String,
    pub submitted: usize,
    completions: Vec<JoinHandle<()>>,
}

impl PublishReceipt {
    /// Waits until every completion callback of this request has run.
    pub async fn wait_for_outcomes(self) {
        for completion in self.completions {
            if let Err(e) = completion.await {
                warn!(request_id = %self.request_id, "Completion callback panicked: {}", e);
            }
        }
    }
}

/// Handler for publish requests.
///
/// Runs on the caller's task up to submission and never waits for broker
/// acknowledgements; outcomes reach the listener on `executor`.
pub struct PublishMessagesHandler {
    registry: Arc<PublisherRegistry>,
    listener: Arc<dyn PublishOutcomeListener>,
    executor: Handle,
}

impl PublishMessagesHandler {
    pub fn new(
        registry: Arc<PublisherRegistry>,
        listener: Arc<dyn PublishOutcomeListener>,
        executor: Handle,
    ) -> Self {
        Self {
            registry,
            listener,
            executor,
        }
    }

    pub fn registry(&self) -> &Arc<PublisherRegistry> {
        &self.registry
    }

    /// Publishes every message of `request` to its topic.
    ///
    /// All envelopes are built before the publisher is resolved, so a
    /// malformed message fails the whole request without any broker call.
    /// A synchronous rejection stops the remaining submissions; messages
    /// already submitted still report their outcome.
    pub async fn handle(
        &self,
        request: Option<PublishRequest>,
    ) -> Result<PublishReceipt, PublishError> {
        let request = request.ok_or(PublishError::NullRequest)?;
        validate_request(&request)?;

        let request_id = RequestId::new();
        let topic = request.topic.unwrap_or_default();
        let messages = request.messages.unwrap_or_default();

        // 1. Build every envelope up front
        let envelopes = messages
            .iter()
            .enumerate()
            .map(|(index, message)| {
                build_envelope(message).map_err(|e| {
                    warn!(
                        request_id = %request_id,
                        topic = %topic,
                        index,
                        "Rejecting malformed message: {}",
                        e
                    );
                    PublishError::envelope(index, message.id.clone(), e)
                })
            })
            .collect::<Result<Vec<Envelope>, PublishError>>()?;

        // 2. Resolve the topic's publisher
        let publisher = self.registry.get_or_create(&topic).await?;

        // 3. Submit in request order
        let mut completions = Vec::with_capacity(envelopes.len());
        for (index, envelope) in envelopes.into_iter().enumerate() {
            let context = PublishContext {
                request_id,
                topic: topic.clone(),
                index,
                message_id: envelope.message_id.clone(),
            };

            let future = publisher.publish(envelope).map_err(|e| {
                warn!(
                    request_id = %request_id,
                    topic = %topic,
                    index,
                    "Publisher rejected message: {}",
                    e
                );
                PublishError::submission(index, e)
            })?;

            debug!(request_id = %request_id, topic = %topic, index, "Message submitted");

            let listener = Arc::clone(&self.listener);
            completions.push(future.add_listener(&self.executor, move |outcome| match outcome {
                PublishOutcome::Acknowledged(broker_id) => listener.on_success(&context, &broker_id),
                PublishOutcome::Failed(failure) => listener.on_failure(&context, &failure),
            }));
        }

        info!(
            request_id = %request_id,
            topic = %topic,
            submitted = completions.len(),
            "Publish request accepted"
        );

        Ok(PublishReceipt {
            request_id,
            topic,
            submitted: completions.len(),
            completions,
        })
    }
}
