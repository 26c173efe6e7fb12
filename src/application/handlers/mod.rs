//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod publish;

pub use publish::{PublishMessagesHandler, PublishReceipt};
