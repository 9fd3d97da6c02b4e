//! Mechanic records and the create/edit form.

use serde::{Deserialize, Serialize};

use super::RecordId;
use super::forms::{Draft, FormError, optional_text, require, require_email};

/// A service provider registered with the garage network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mechanic {
    /// Backend identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Town or area served.
    #[serde(default)]
    pub location: String,
    /// Free-form admin notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Lifecycle status such as `pending`, `approved`, or `suspended`.
    #[serde(default)]
    pub status: String,
    /// Trade speciality.
    #[serde(default)]
    pub specialization: String,
    /// Reason recorded when an application was rejected.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Whether the backend has verified the mechanic.
    #[serde(default)]
    pub is_verified: Option<bool>,
    /// Self-reported experience.
    #[serde(default)]
    pub experience: Option<String>,
    /// Certifications held.
    #[serde(default)]
    pub certifications: Option<String>,
}

/// Fields submitted when creating or editing a mechanic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanicForm {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Town or area served.
    pub location: String,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Trade speciality.
    pub specialization: String,
}

impl Default for MechanicForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            notes: None,
            status: "pending".to_owned(),
            specialization: String::new(),
        }
    }
}

impl From<&Mechanic> for MechanicForm {
    fn from(mechanic: &Mechanic) -> Self {
        Self {
            name: mechanic.name.clone(),
            email: mechanic.email.clone(),
            phone: mechanic.phone.clone(),
            location: mechanic.location.clone(),
            notes: mechanic.notes.clone(),
            status: mechanic.status.clone(),
            specialization: mechanic.specialization.clone(),
        }
    }
}

impl Draft for MechanicForm {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "email",
        "phone",
        "location",
        "notes",
        "status",
        "specialization",
    ];

    fn assign(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let text = value.trim().to_owned();
        match field {
            "name" => self.name = text,
            "email" => self.email = text,
            "phone" => self.phone = text,
            "location" => self.location = text,
            "notes" => self.notes = optional_text(value),
            "status" => self.status = text,
            "specialization" => self.specialization = text,
            other => return Err(FormError::unknown(other, Self::FIELDS)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require_email("email", &self.email)?;
        require("phone", &self.phone)?;
        require("location", &self.location)?;
        require("status", &self.status)?;
        require("specialization", &self.specialization)
    }
}
