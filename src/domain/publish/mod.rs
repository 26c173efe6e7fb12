//! Publish module - request validation, envelope construction, outcomes.
//!
//! A request is validated as a whole, then each message becomes an
//! [`Envelope`]. Each submitted envelope moves `Built -> Submitted` and
//! ends in exactly one [`PublishOutcome`].

mod attributes;
mod envelope;
mod errors;
mod outcome;
mod request;
mod validator;

pub use attributes::{AttributeError, Attributes};
pub use envelope::{build_envelope, Envelope, EnvelopeError};
pub use errors::PublishError;
pub use outcome::{PublishContext, PublishFailure, PublishOutcome, SubmitError};
pub use request::{Message, PublishRequest};
pub use validator::{validate_request, RequestValidationError};
