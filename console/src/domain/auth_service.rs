//! Sign-in and registration use-cases.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::ports::{ApiError, AuthGateway, SessionStorageError};
use super::{
    FormError, LoginCredentials, Registration, RegistrationInput, Role, Route, SessionContext,
    SessionUser, SignInResponse,
};

/// Why signing in or registering failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The form was rejected before any request.
    #[error(transparent)]
    Form(#[from] FormError),
    /// The backend accepted the request but returned no usable account.
    #[error("Login failed.")]
    MissingAccount,
    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The session could not be persisted.
    #[error(transparent)]
    Storage(#[from] SessionStorageError),
}

/// Authentication use-cases over an [`AuthGateway`].
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
}

impl AuthService {
    /// Create the service.
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Validate the form, sign in, persist the session, and return the
    /// route the account lands on.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Form`] before any request for invalid input,
    /// [`AuthError::Api`] when the backend refuses, and
    /// [`AuthError::MissingAccount`] when the response lacks an account or
    /// token.
    pub async fn sign_in(
        &self,
        session: &mut SessionContext,
        email: &str,
        password: &str,
    ) -> Result<Route, AuthError> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        let response = self.gateway.sign_in(&credentials).await.map_err(|error| {
            warn!(kind = error.kind(), %error, "sign-in rejected");
            error
        })?;
        let landing = Route::landing_for_reported(
            response
                .found_user
                .as_ref()
                .and_then(|account| account.role.as_deref()),
        );
        let (user, token) = session_from_response(&credentials, response)?;
        info!(email = %user.email, role = %user.role, "signed in");
        session.login(user, token)?;
        Ok(landing)
    }

    /// Validate and submit a registration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Form`] for invalid input and [`AuthError::Api`]
    /// when the backend refuses.
    pub async fn register(&self, input: RegistrationInput<'_>) -> Result<(), AuthError> {
        let registration = Registration::try_from_input(input)?;
        self.gateway.register(&registration).await?;
        info!(email = registration.email(), "registered account");
        Ok(())
    }
}

fn session_from_response(
    credentials: &LoginCredentials,
    response: SignInResponse,
) -> Result<(SessionUser, String), AuthError> {
    let account = response.found_user.ok_or(AuthError::MissingAccount)?;
    let id = account.id.ok_or(AuthError::MissingAccount)?;
    let token = response
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingAccount)?;
    let user = SessionUser {
        id,
        email: account
            .email
            .unwrap_or_else(|| credentials.email().to_owned()),
        name: account
            .username
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "User".to_owned()),
        role: account
            .role
            .filter(|role| !role.trim().is_empty())
            .map_or(Role::User, Role::from),
    };
    Ok((user, token))
}
