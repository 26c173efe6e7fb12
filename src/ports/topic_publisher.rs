//! TopicPublisher port - per-topic publisher handle.
//!
//! A handle accepts envelopes synchronously and hands back a
//! [`PublishFuture`] that resolves once the broker acknowledges or rejects
//! the message. Submitting never waits for the broker.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::domain::foundation::BrokerMessageId;
use crate::domain::publish::{Envelope, PublishFailure, PublishOutcome, SubmitError};

/// Port for a publisher bound to one topic.
///
/// Implementations must be safe to share between request handlers:
/// `publish` is called concurrently without external locking.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// The topic this handle publishes to.
    fn topic(&self) -> &str;

    /// Submits one envelope.
    ///
    /// Returns `Err` only when the handle refuses the envelope outright;
    /// broker-side failures resolve the returned future instead.
    fn publish(&self, envelope: Envelope) -> Result<PublishFuture, SubmitError>;

    /// Stops accepting submissions. Already submitted messages still resolve.
    async fn shutdown(&self);
}

/// Pending broker acknowledgement for one submitted message.
#[must_use = "a PublishFuture does nothing unless awaited or given a listener"]
pub struct PublishFuture {
    inner: BoxFuture<'static, Result<BrokerMessageId, PublishFailure>>,
}

impl PublishFuture {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<BrokerMessageId, PublishFailure>> + Send + 'static,
    {
        Self {
            inner: future.boxed(),
        }
    }

    /// An already-resolved future.
    pub fn ready(result: Result<BrokerMessageId, PublishFailure>) -> Self {
        Self::new(futures::future::ready(result))
    }

    /// Runs `listener` with the outcome on `executor` once the future resolves.
    ///
    /// Returns immediately. The listener runs exactly once.
    pub fn add_listener<F>(self, executor: &Handle, listener: F) -> JoinHandle<()>
    where
        F: FnOnce(PublishOutcome) + Send + 'static,
    {
        executor.spawn(async move {
            let outcome = PublishOutcome::from(self.inner.await);
            listener(outcome);
        })
    }
}

impl Future for PublishFuture {
    type Output = Result<BrokerMessageId, PublishFailure>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl std::fmt::Debug for PublishFuture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishFuture").finish_non_exhaustive()
    }
}
