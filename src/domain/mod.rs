//! Domain layer containing the publish protocol and its value types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, IDs, errors)
//! - `publish` - Publish requests, validation, envelope construction, outcomes

pub mod foundation;
pub mod publish;
