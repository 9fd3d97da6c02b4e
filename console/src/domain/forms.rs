//! Form input validation shared by login, registration, and edit drafts.
//!
//! Edit screens are rendered as drafts: a patch seeded from the selected
//! record, updated one `field=value` assignment at a time, then validated
//! before it is submitted.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Validation failures reported next to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Required field was empty.
    #[error("{field} is required")]
    Required {
        /// Field name.
        field: &'static str,
    },
    /// Email did not look like an address.
    #[error("Invalid email")]
    InvalidEmail,
    /// Password below the minimum length.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Value could not be read as the field's type.
    #[error("{field} must be {expected}, got '{value}'")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Human description of the accepted values.
        expected: &'static str,
        /// Rejected input.
        value: String,
    },
    /// Assignment named a field the form does not have.
    #[error("unknown field '{field}'; expected one of: {allowed}")]
    UnknownField {
        /// Field name supplied.
        field: String,
        /// Comma-separated list of accepted names.
        allowed: String,
    },
    /// Assignment was not written as `field=value`.
    #[error("expected field=value, got '{input}'")]
    MalformedAssignment {
        /// Raw assignment text.
        input: String,
    },
}

impl FormError {
    /// Build an [`FormError::InvalidValue`].
    pub fn invalid(field: &str, expected: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            field: field.to_owned(),
            expected,
            value: value.to_owned(),
        }
    }

    /// Build an [`FormError::UnknownField`] listing `allowed`.
    pub fn unknown(field: &str, allowed: &[&str]) -> Self {
        Self::UnknownField {
            field: field.to_owned(),
            allowed: allowed.join(", "),
        }
    }
}

/// A form whose fields are set one assignment at a time.
pub trait Draft {
    /// Field names accepted by [`Draft::assign`].
    const FIELDS: &'static [&'static str];

    /// Set one field from its text input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] for unknown fields or values of the wrong type.
    fn assign(&mut self, field: &str, value: &str) -> Result<(), FormError>;

    /// Check the completed draft before submission.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found.
    fn validate(&self) -> Result<(), FormError>;

    /// Apply a list of `field=value` assignments, then validate.
    ///
    /// # Errors
    ///
    /// Returns the first malformed, unknown, or invalid assignment, or the
    /// validation failure of the finished draft.
    fn apply_all<I, S>(&mut self, assignments: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for assignment in assignments {
            let (field, value) = split_assignment(assignment.as_ref())?;
            self.assign(field, value)?;
        }
        self.validate()
    }
}

/// Split `field=value` at the first `=`.
///
/// # Errors
///
/// Returns [`FormError::MalformedAssignment`] when no `=` is present or the
/// field name is empty.
pub fn split_assignment(input: &str) -> Result<(&str, &str), FormError> {
    match input.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => Err(FormError::MalformedAssignment {
            input: input.to_owned(),
        }),
    }
}

/// Require a non-blank value.
///
/// # Errors
///
/// Returns [`FormError::Required`] for blank input.
pub fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Required { field });
    }
    Ok(())
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Require a well-formed email address.
///
/// # Errors
///
/// Returns [`FormError::Required`] for blank input and
/// [`FormError::InvalidEmail`] when the address does not match.
pub fn require_email(field: &'static str, value: &str) -> Result<(), FormError> {
    require(field, value)?;
    if !email_regex().is_match(value.trim()) {
        return Err(FormError::InvalidEmail);
    }
    Ok(())
}

/// Parse a boolean form toggle.
///
/// # Errors
///
/// Returns [`FormError::InvalidValue`] for anything but yes/no style input.
pub fn parse_flag(field: &str, value: &str) -> Result<bool, FormError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(FormError::invalid(field, "true or false", value)),
    }
}

/// Parse an unsigned whole number.
///
/// # Errors
///
/// Returns [`FormError::InvalidValue`] when `value` is not a whole number.
pub fn parse_count(field: &str, value: &str) -> Result<u32, FormError> {
    value
        .trim()
        .parse()
        .map_err(|_| FormError::invalid(field, "a whole number", value))
}

/// Treat blank input as clearing an optional field.
#[must_use]
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
