//! Backend timestamps kept in their textual form.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An ISO-8601 timestamp as sent by the backend.
///
/// The raw text survives so unparseable values still render; sorting uses
/// [`Timestamp::epoch_millis`], which is `None` for those values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wrap a raw timestamp string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Milliseconds since the Unix epoch, when the text parses.
    ///
    /// Accepts RFC 3339, naive date-times, and bare dates (taken as UTC
    /// midnight).
    #[must_use]
    pub fn epoch_millis(&self) -> Option<i64> {
        let raw = self.0.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.timestamp_millis());
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(parsed.and_utc().timestamp_millis());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc().timestamp_millis())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::parse_from_rfc3339(self.0.trim()) {
            Ok(parsed) => write!(f, "{}", parsed.format("%Y-%m-%d %H:%M")),
            Err(_) => f.write_str(&self.0),
        }
    }
}

/// Millisecond key for an optional timestamp field.
#[must_use]
pub fn timestamp_key(value: Option<&Timestamp>) -> Option<i64> {
    value.and_then(Timestamp::epoch_millis)
}
