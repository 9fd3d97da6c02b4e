//! Account roles and the screens each role lands on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Customer booking services.
    #[default]
    User,
    /// Back-office administrator.
    Admin,
    /// Administrator with full privileges.
    SuperAdmin,
    /// Service provider.
    Mechanic,
    /// Any role string this console does not know about.
    Unrecognised(String),
}

impl Role {
    /// Wire form of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "superadmin",
            Self::Mechanic => "mechanic",
            Self::Unrecognised(raw) => raw,
        }
    }

    /// Whether the role may use the admin console.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Self::User,
            "admin" => Self::Admin,
            "superadmin" | "super-admin" => Self::SuperAdmin,
            "mechanic" => Self::Mechanic,
            _ => Self::Unrecognised(raw),
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
