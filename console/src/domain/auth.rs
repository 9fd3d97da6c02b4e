//! Sign-in and registration inputs.
//!
//! Constructors validate raw form input so adapters only ever see credentials
//! that passed the same checks the sign-in form applies.

use std::fmt;

use zeroize::Zeroizing;

use super::forms::{FormError, optional_text, require, require_email};
use super::{RecordId, Role};

/// Shortest password the sign-in form accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is trimmed and well formed.
/// - `password` holds at least [`MIN_PASSWORD_LEN`] characters and is wiped
///   from memory on drop.
///
/// # Examples
/// ```
/// use crm_console::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ops@garage.test", "secret1")
///     .expect("valid credentials");
/// assert_eq!(creds.email(), "ops@garage.test");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when the email is missing or malformed, or the
    /// password is missing or too short.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FormError> {
        require_email("email", email)?;
        validate_password(password)?;
        Ok(Self {
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as typed.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn validate_password(password: &str) -> Result<(), FormError> {
    require("password", password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Validated account registration.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    email: String,
    first_name: String,
    last_name: Option<String>,
    phone: Option<String>,
    role: Role,
    password: Zeroizing<String>,
}

/// Raw registration form input.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationInput<'a> {
    /// Account email.
    pub email: &'a str,
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: Option<&'a str>,
    /// Contact phone.
    pub phone: Option<&'a str>,
    /// Requested role; defaults to `user`.
    pub role: Option<&'a str>,
    /// Chosen password.
    pub password: &'a str,
}

impl Registration {
    /// Validate raw registration input.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] for a missing name, a bad email or password, or
    /// an unknown role.
    pub fn try_from_input(input: RegistrationInput<'_>) -> Result<Self, FormError> {
        require_email("email", input.email)?;
        require("first_name", input.first_name)?;
        validate_password(input.password)?;
        let role = match input.role.map(Role::from) {
            None => Role::User,
            Some(Role::Unrecognised(raw)) => {
                return Err(FormError::invalid(
                    "role",
                    "one of user, admin, superadmin, mechanic",
                    &raw,
                ));
            }
            Some(role) => role,
        };
        Ok(Self {
            email: input.email.trim().to_owned(),
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.and_then(optional_text),
            phone: input.phone.and_then(optional_text),
            role,
            password: Zeroizing::new(input.password.to_owned()),
        })
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name, if given.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Contact phone, if given.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Requested role.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Account fields returned by the sign-in endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignedInAccount {
    /// Backend identifier.
    pub id: Option<RecordId>,
    /// Account email.
    pub email: Option<String>,
    /// Display name.
    pub username: Option<String>,
    /// Role string as sent.
    pub role: Option<String>,
}

/// Response contract of the sign-in endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignInResponse {
    /// Matched account; absent when the backend found none.
    pub found_user: Option<SignedInAccount>,
    /// Bearer token for later requests.
    pub access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "secret1", FormError::Required { field: "email" })]
    #[case("not-an-email", "secret1", FormError::InvalidEmail)]
    #[case("a@b.co", "", FormError::Required { field: "password" })]
    #[case("a@b.co", "12345", FormError::PasswordTooShort { min: 6 })]
    fn rejects_invalid_sign_in_forms(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: FormError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(email, password),
            Err(expected)
        );
    }

    #[test]
    fn debug_output_hides_the_password() {
        let creds =
            LoginCredentials::try_from_parts(" ops@garage.test ", "hunter22").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter22"));
        assert_eq!(creds.email(), "ops@garage.test");
    }

    #[test]
    fn registration_defaults_to_the_user_role() {
        let registration = Registration::try_from_input(RegistrationInput {
            email: "new@garage.test",
            first_name: "Achieng",
            password: "secret1",
            last_name: Some("  "),
            ..RegistrationInput::default()
        })
        .expect("valid registration");
        assert_eq!(registration.role(), &Role::User);
        assert_eq!(registration.last_name(), None);
    }

    #[test]
    fn registration_rejects_unknown_roles() {
        let result = Registration::try_from_input(RegistrationInput {
            email: "new@garage.test",
            first_name: "Achieng",
            password: "secret1",
            role: Some("owner"),
            ..RegistrationInput::default()
        });
        assert!(matches!(result, Err(FormError::InvalidValue { .. })));
    }
}
