//! Bookable services and the create/edit form.

use serde::{Deserialize, Serialize};

use super::forms::{Draft, FormError, parse_count, parse_flag, require};
use super::{Price, RecordId, Timestamp};

/// A bookable service offered by the garage network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Backend identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Decimal price string.
    pub price: Price,
    /// Duration in minutes.
    #[serde(default)]
    pub duration: u32,
    /// Whether the service can currently be booked.
    #[serde(default)]
    pub is_available: bool,
    /// Owning category.
    #[serde(default)]
    pub category_id: Option<RecordId>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Fields submitted when creating or editing a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceForm {
    /// Display name.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Decimal price string.
    pub price: Price,
    /// Duration in minutes.
    pub duration: u32,
    /// Whether the service can be booked.
    pub is_available: bool,
    /// Owning category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<RecordId>,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: Price::default(),
            duration: 0,
            is_available: true,
            category_id: None,
        }
    }
}

impl From<&Service> for ServiceForm {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            price: service.price.clone(),
            duration: service.duration,
            is_available: service.is_available,
            category_id: service.category_id.clone(),
        }
    }
}

impl Draft for ServiceForm {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "description",
        "price",
        "duration",
        "isAvailable",
        "categoryId",
    ];

    fn assign(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "name" => self.name = value.trim().to_owned(),
            "description" => self.description = value.trim().to_owned(),
            "price" => self.price = Price::new(value),
            "duration" => self.duration = parse_count(field, value)?,
            "isAvailable" => self.is_available = parse_flag(field, value)?,
            "categoryId" => {
                self.category_id = (!value.trim().is_empty()).then(|| RecordId::parse(value));
            }
            other => return Err(FormError::unknown(other, Self::FIELDS)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        require("price", self.price.as_str())?;
        if !self.price.is_valid() {
            return Err(FormError::invalid(
                "price",
                "a non-negative amount",
                self.price.as_str(),
            ));
        }
        if self.duration == 0 {
            return Err(FormError::Required { field: "duration" });
        }
        Ok(())
    }
}
