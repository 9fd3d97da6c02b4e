//! Account records as listed by the admin console.

use serde::{Deserialize, Serialize};

use super::forms::{Draft, FormError, optional_text, require, require_email};
use super::{RecordId, Role, Timestamp};

/// A registered account.
///
/// The backend may echo a password hash; it is ignored on decode and never
/// held client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Account role.
    #[serde(default)]
    pub role: Role,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Editable account fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
        }
    }
}

impl Draft for UserForm {
    const FIELDS: &'static [&'static str] = &["name", "email", "role", "phone", "address"];

    fn assign(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "name" => self.name = value.trim().to_owned(),
            "email" => self.email = value.trim().to_owned(),
            "role" => match Role::from(value) {
                Role::Unrecognised(_) => {
                    return Err(FormError::invalid(
                        field,
                        "one of user, admin, superadmin, mechanic",
                        value,
                    ));
                }
                role => self.role = role,
            },
            "phone" => self.phone = optional_text(value),
            "address" => self.address = optional_text(value),
            other => return Err(FormError::unknown(other, Self::FIELDS)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require_email("email", &self.email)
    }
}
