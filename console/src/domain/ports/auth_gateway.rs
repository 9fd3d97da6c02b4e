//! Port for the backend's sign-in and registration endpoints.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{LoginCredentials, Registration, SignInResponse};

/// Authenticates accounts against the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for an account and access token.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignInResponse, ApiError>;

    /// Create an account.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;
}
