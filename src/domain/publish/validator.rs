//! Request-level validation run before any publisher is touched.

use thiserror::Error;

use super::request::PublishRequest;

/// Missing top-level fields of a publish request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    #[error("topic is required")]
    MissingTopic,

    #[error("at least one message is required")]
    MissingMessages,
}

/// Checks that the request names a topic and carries at least one message.
///
/// Per-message fields are not inspected here; they are checked when each
/// envelope is built.
pub fn validate_request(request: &PublishRequest) -> Result<(), RequestValidationError> {
    match request.topic.as_deref() {
        Some(topic) if !topic.trim().is_empty() => {}
        _ => return Err(RequestValidationError::MissingTopic),
    }

    match request.messages.as_deref() {
        Some(messages) if !messages.is_empty() => Ok(()),
        _ => Err(RequestValidationError::MissingMessages),
    }
}
