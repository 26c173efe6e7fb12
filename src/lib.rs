//! Pub/Sub Proxy - HTTP front door for a publish/subscribe broker
//!
//! Validates publish requests, turns each message into a broker envelope
//! and hands it to a per-topic publisher that is created once and reused.
//! Broker acknowledgements are reported asynchronously to an outcome
//! listener; the HTTP response only reflects synchronous failures.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod observability;
pub mod ports;
