//! Inbound publish request as seen by the domain.
//!
//! Every field is optional: absence is a domain error reported by
//! validation or envelope construction, never a deserialization failure.

use serde_json::Value;

/// A topic plus the messages to publish to it, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishRequest {
    pub topic: Option<String>,
    pub messages: Option<Vec<Message>>,
}

impl PublishRequest {
    pub fn new(topic: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            topic: Some(topic.into()),
            messages: Some(messages),
        }
    }
}

/// One message of a publish request.
///
/// `attributes` is the raw key-value bag received at the boundary; it is
/// coerced to string pairs during envelope construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub id: Option<String>,
    pub data: Option<String>,
    pub publish_time: Option<String>,
    pub attributes: Option<Value>,
}

impl Message {
    /// Builds a message with every field present.
    pub fn new(
        id: impl Into<String>,
        data: impl Into<String>,
        publish_time: impl Into<String>,
        attributes: Value,
    ) -> Self {
        Self {
            id: Some(id.into()),
            data: Some(data.into()),
            publish_time: Some(publish_time.into()),
            attributes: Some(attributes),
        }
    }
}
