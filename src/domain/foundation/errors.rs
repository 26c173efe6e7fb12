//! Error types shared across the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request errors
    NullRequest,
    MissingRequiredFields,
    EnvelopeConstructionFailed,

    // Broker errors
    PublisherUnavailable,
    SubmissionRejected,

    // Infrastructure errors
    ConfigurationError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::NullRequest => "NULL_REQUEST",
            ErrorCode::MissingRequiredFields => "MISSING_REQUIRED_FIELDS",
            ErrorCode::EnvelopeConstructionFailed => "ENVELOPE_CONSTRUCTION_FAILED",
            ErrorCode::PublisherUnavailable => "PUBLISHER_UNAVAILABLE",
            ErrorCode::SubmissionRejected => "SUBMISSION_REJECTED",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a publisher-unavailable error for a topic.
    pub fn publisher_unavailable(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PublisherUnavailable, message).with_detail("topic", topic.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
