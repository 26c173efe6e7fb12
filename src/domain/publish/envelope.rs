//! Broker-ready message envelopes.

use thiserror::Error;

use crate::domain::foundation::{Timestamp, TimestampError};

use super::attributes::{AttributeError, Attributes};
use super::request::Message;

/// Why a message could not be turned into an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("message field '{0}' is required")]
    MissingField(&'static str),

    #[error("invalid attributes: {0}")]
    InvalidAttributes(#[from] AttributeError),

    #[error("invalid publish time: {0}")]
    InvalidPublishTime(#[from] TimestampError),
}

/// Payload, attributes and metadata of one message, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Client-supplied message id.
    pub message_id: String,
    pub data: Vec<u8>,
    pub attributes: Attributes,
    pub publish_time: Timestamp,
}

impl Envelope {
    /// Payload as UTF-8 text, lossy for non-UTF-8 bytes.
    pub fn data_utf8(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Bytes counted against broker size limits: payload plus attributes.
    pub fn size_bytes(&self) -> usize {
        self.data.len() + self.attributes.byte_len()
    }
}

/// Builds the envelope for one message.
///
/// Fields are checked in the order data, id, publish time, attributes; the
/// first absent one is reported.
pub fn build_envelope(message: &Message) -> Result<Envelope, EnvelopeError> {
    let data = message
        .data
        .as_ref()
        .ok_or(EnvelopeError::MissingField("data"))?;
    let message_id = message
        .id
        .as_ref()
        .ok_or(EnvelopeError::MissingField("messageId"))?;
    let publish_time = message
        .publish_time
        .as_deref()
        .ok_or(EnvelopeError::MissingField("publishTime"))?;
    let attributes = message
        .attributes
        .as_ref()
        .ok_or(EnvelopeError::MissingField("attributes"))?;

    Ok(Envelope {
        message_id: message_id.clone(),
        data: data.as_bytes().to_vec(),
        attributes: Attributes::from_value(attributes)?,
        publish_time: Timestamp::parse_rfc3339(publish_time)?,
    })
}
