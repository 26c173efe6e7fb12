//! Publish command handlers.

mod publish_messages;

pub use publish_messages::{PublishMessagesHandler, PublishReceipt};
