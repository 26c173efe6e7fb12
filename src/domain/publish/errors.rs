//! Publish-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::envelope::EnvelopeError;
use super::outcome::SubmitError;
use super::validator::RequestValidationError;

/// Synchronous failures of a publish request.
///
/// Asynchronous broker failures are never surfaced here; they reach the
/// outcome listener instead.
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// The request itself was absent.
    #[error("publish request is required")]
    NullRequest,

    /// Topic or message list absent or empty.
    #[error("missing required fields: {0}")]
    MissingRequiredFields(#[from] RequestValidationError),

    /// A message could not be turned into an envelope.
    #[error("message {index} ({}) is invalid: {source}", .message_id.as_deref().unwrap_or("<no id>"))]
    EnvelopeConstruction {
        index: usize,
        message_id: Option<String>,
        source: EnvelopeError,
    },

    /// The publisher for the topic could not be obtained.
    #[error("publisher unavailable: {0}")]
    PublisherUnavailable(DomainError),

    /// The publisher refused a message synchronously.
    #[error("message {index} was rejected: {source}")]
    Submission { index: usize, source: SubmitError },
}

impl PublishError {
    pub fn envelope(index: usize, message_id: Option<String>, source: EnvelopeError) -> Self {
        PublishError::EnvelopeConstruction {
            index,
            message_id,
            source,
        }
    }

    pub fn submission(index: usize, source: SubmitError) -> Self {
        PublishError::Submission { index, source }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PublishError::NullRequest => ErrorCode::NullRequest,
            PublishError::MissingRequiredFields(_) => ErrorCode::MissingRequiredFields,
            PublishError::EnvelopeConstruction { .. } => ErrorCode::EnvelopeConstructionFailed,
            PublishError::PublisherUnavailable(err) => err.code,
            PublishError::Submission { .. } => ErrorCode::SubmissionRejected,
        }
    }
}

impl From<DomainError> for PublishError {
    fn from(err: DomainError) -> Self {
        PublishError::PublisherUnavailable(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_missing_required_fields() {
        let err: PublishError = RequestValidationError::MissingTopic.into();
        assert_eq!(err.code(), ErrorCode::MissingRequiredFields);
        assert_eq!(err.to_string(), "missing required fields: topic is required");
    }

    #[test]
    fn envelope_error_names_message() {
        let err = PublishError::envelope(
            2,
            Some("m3".to_string()),
            EnvelopeError::MissingField("data"),
        );
        assert_eq!(err.code(), ErrorCode::EnvelopeConstructionFailed);
        assert_eq!(
            err.to_string(),
            "message 2 (m3) is invalid: message field 'data' is required"
        );
    }

    #[test]
    fn envelope_error_without_id_uses_placeholder() {
        let err = PublishError::envelope(0, None, EnvelopeError::MissingField("messageId"));
        assert!(err.to_string().contains("<no id>"));
    }

    #[test]
    fn domain_error_keeps_its_code() {
        let err: PublishError = DomainError::new(ErrorCode::ConfigurationError, "down").into();
        assert_eq!(err.code(), ErrorCode::ConfigurationError);
    }

    #[test]
    fn submission_error_code() {
        let err = PublishError::submission(0, SubmitError::Closed("orders".to_string()));
        assert_eq!(err.code(), ErrorCode::SubmissionRejected);
    }
}
