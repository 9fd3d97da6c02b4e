//! Backend record identifiers.
//!
//! The backend is inconsistent about identifier types: some resources use
//! numeric keys, others strings. [`RecordId`] accepts either on the wire and
//! serializes back in the form it arrived in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a backend record, numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer key.
    Numeric(i64),
    /// Opaque string key.
    Text(String),
}

impl RecordId {
    /// Parse user input, preferring the numeric form when it fits.
    ///
    /// # Examples
    ///
    /// ```
    /// use crm_console::domain::RecordId;
    ///
    /// assert_eq!(RecordId::parse("42"), RecordId::Numeric(42));
    /// assert_eq!(RecordId::parse("m-7"), RecordId::Text("m-7".to_owned()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_owned()), Self::Numeric)
    }

    /// Whether `other` names the same record, comparing rendered forms.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self == other || self.to_string() == other.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}
