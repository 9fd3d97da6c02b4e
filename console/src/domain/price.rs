//! Monetary amounts as the backend sends them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A price carried in its wire form.
///
/// Services report prices as decimal strings while service requests use JSON
/// numbers. The received text is kept for display and search; [`Price::amount`]
/// parses it for numeric sorting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Price(String);

impl Price {
    /// Wrap a decimal string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_owned())
    }

    /// Text form as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed amount; `NaN` when the text is not a number.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.0.parse().unwrap_or(f64::NAN)
    }

    /// Whether the text parses as a finite, non-negative amount.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let amount = self.amount();
        amount.is_finite() && amount >= 0.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WirePrice::deserialize(deserializer)? {
            WirePrice::Text(text) => Self::new(text),
            WirePrice::Number(number) => Self(number.to_string()),
        })
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Serialize a price as a JSON number, for endpoints that take numeric
/// amounts. Unparseable text is sent unchanged.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn serialize_amount<S: Serializer>(price: &Price, serializer: S) -> Result<S::Ok, S::Error> {
    match serde_json::Number::from_f64(price.amount()) {
        Some(number) if price.is_valid() => number.serialize(serializer),
        _ => serializer.serialize_str(&price.0),
    }
}
