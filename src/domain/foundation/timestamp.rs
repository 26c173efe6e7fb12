//! Timestamp value object for broker publish times.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Seconds offset of 0001-01-01T00:00:00Z, the earliest instant a broker accepts.
const MIN_SECONDS: i64 = -62_135_596_800;

/// Seconds offset of 9999-12-31T23:59:59Z, the latest instant a broker accepts.
const MAX_SECONDS: i64 = 253_402_300_799;

/// Failure to parse a publish time string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("'{input}' is not a valid RFC3339 timestamp: {reason}")]
    Malformed { input: String, reason: String },

    #[error("'{0}' is outside the supported range 0001-01-01..9999-12-31")]
    OutOfRange(String),
}

/// Immutable point in time, always UTC.
///
/// Exposes the broker-native `seconds` + `nanos` split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parses an RFC3339 / ISO-8601 timestamp with offset.
    ///
    /// Offsets other than `Z` are normalized to UTC. Fractional seconds up
    /// to nanosecond precision are kept. Surrounding whitespace is rejected.
    pub fn parse_rfc3339(input: &str) -> Result<Self, TimestampError> {
        let parsed = DateTime::parse_from_rfc3339(input).map_err(|e| TimestampError::Malformed {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        let utc = parsed.with_timezone(&Utc);
        if !(MIN_SECONDS..=MAX_SECONDS).contains(&utc.timestamp()) {
            return Err(TimestampError::OutOfRange(input.to_string()));
        }
        Ok(Self(utc))
    }

    /// Whole seconds since the Unix epoch.
    pub fn seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Sub-second nanoseconds, always in `0..1_000_000_000`.
    pub fn nanos(&self) -> u32 {
        self.0.timestamp_subsec_nanos()
    }

    /// Formats as RFC3339 in UTC with `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_rfc3339(s)
    }
}
