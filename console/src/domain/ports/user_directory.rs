//! Port for account administration.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{RecordId, User, UserForm};

/// Reads and changes accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every account.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// Change profile fields or role.
    async fn update_user(&self, id: &RecordId, form: &UserForm) -> Result<User, ApiError>;

    /// Remove an account.
    async fn delete_user(&self, id: &RecordId) -> Result<(), ApiError>;
}
