//! Service requests booked by customers and handled by mechanics.

use serde::{Deserialize, Serialize};

use super::forms::{Draft, FormError, optional_text, require};
use super::price::serialize_amount;
use super::{Price, RecordId, Timestamp};

/// Summary of a related record embedded in a service request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedRecord {
    /// Backend identifier.
    pub id: RecordId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A booking of one service with one mechanic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    /// Backend identifier.
    pub id: RecordId,
    /// Customer who booked.
    #[serde(default)]
    pub user: Option<RelatedRecord>,
    /// Assigned mechanic.
    #[serde(default)]
    pub mechanic: Option<RelatedRecord>,
    /// Booked service.
    #[serde(default)]
    pub service: Option<RelatedRecord>,
    /// Workflow status.
    #[serde(default)]
    pub status: String,
    /// Customer's description of the job.
    #[serde(default)]
    pub description: String,
    /// Agreed price.
    pub price: Price,
    /// Appointment time.
    #[serde(default)]
    pub scheduled_date: Option<Timestamp>,
    /// Where the job takes place.
    #[serde(default)]
    pub location: String,
    /// Reason recorded when a mechanic declined.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl ServiceRequest {
    /// Name of an embedded record, or `-` when it is absent.
    #[must_use]
    pub fn related_name(related: Option<&RelatedRecord>) -> &str {
        related
            .map(|record| record.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("-")
    }
}

/// Booking form filled in from the customer dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceRequest {
    /// Chosen mechanic.
    pub mechanic_id: Option<RecordId>,
    /// Chosen service.
    pub service_id: Option<RecordId>,
    /// Job description.
    pub description: String,
    /// Offered price, sent as a number.
    #[serde(serialize_with = "serialize_amount")]
    pub price: Price,
    /// Requested appointment time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    /// Where the job takes place.
    pub location: String,
}

impl Draft for NewServiceRequest {
    const FIELDS: &'static [&'static str] = &[
        "mechanicId",
        "serviceId",
        "description",
        "price",
        "scheduledDate",
        "location",
    ];

    fn assign(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "mechanicId" => self.mechanic_id = optional_text(value).map(|id| RecordId::parse(&id)),
            "serviceId" => self.service_id = optional_text(value).map(|id| RecordId::parse(&id)),
            "description" => self.description = value.trim().to_owned(),
            "price" => self.price = Price::new(value),
            "scheduledDate" => self.scheduled_date = optional_text(value),
            "location" => self.location = value.trim().to_owned(),
            other => return Err(FormError::unknown(other, Self::FIELDS)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FormError> {
        if self.mechanic_id.is_none() {
            return Err(FormError::Required { field: "mechanicId" });
        }
        if self.service_id.is_none() {
            return Err(FormError::Required { field: "serviceId" });
        }
        require("description", &self.description)?;
        validate_price(&self.price)?;
        require("location", &self.location)
    }
}

/// Fields an admin may change on an existing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestForm {
    /// Workflow status.
    pub status: String,
    /// Job description.
    pub description: String,
    /// Agreed price, sent as a number.
    #[serde(serialize_with = "serialize_amount")]
    pub price: Price,
    /// Appointment time.
    pub scheduled_date: Option<String>,
    /// Where the job takes place.
    pub location: String,
}

impl From<&ServiceRequest> for ServiceRequestForm {
    fn from(request: &ServiceRequest) -> Self {
        Self {
            status: request.status.clone(),
            description: request.description.clone(),
            price: request.price.clone(),
            scheduled_date: request
                .scheduled_date
                .as_ref()
                .map(|stamp| stamp.as_str().to_owned()),
            location: request.location.clone(),
        }
    }
}

impl Draft for ServiceRequestForm {
    const FIELDS: &'static [&'static str] =
        &["status", "description", "price", "scheduledDate", "location"];

    fn assign(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "status" => self.status = value.trim().to_owned(),
            "description" => self.description = value.trim().to_owned(),
            "price" => self.price = Price::new(value),
            "scheduledDate" => self.scheduled_date = optional_text(value),
            "location" => self.location = value.trim().to_owned(),
            other => return Err(FormError::unknown(other, Self::FIELDS)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FormError> {
        require("status", &self.status)?;
        validate_price(&self.price)
    }
}

fn validate_price(price: &Price) -> Result<(), FormError> {
    require("price", price.as_str())?;
    if price.is_valid() {
        Ok(())
    } else {
        Err(FormError::invalid(
            "price",
            "a non-negative amount",
            price.as_str(),
        ))
    }
}
