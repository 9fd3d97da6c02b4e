//! Port for mechanic records and their approval lifecycle.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{Mechanic, MechanicForm, RecordId};

/// Reads and changes mechanic records.
///
/// Lifecycle transitions return the mechanic as the backend stored it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MechanicDirectory: Send + Sync {
    /// Every mechanic.
    async fn list_mechanics(&self) -> Result<Vec<Mechanic>, ApiError>;

    /// Register a mechanic.
    async fn create_mechanic(&self, form: &MechanicForm) -> Result<Mechanic, ApiError>;

    /// Replace the editable fields of a mechanic.
    async fn update_mechanic(
        &self,
        id: &RecordId,
        form: &MechanicForm,
    ) -> Result<Mechanic, ApiError>;

    /// Remove a mechanic.
    async fn delete_mechanic(&self, id: &RecordId) -> Result<(), ApiError>;

    /// Approve a pending application.
    async fn approve_mechanic(&self, id: &RecordId) -> Result<Mechanic, ApiError>;

    /// Reject a pending application.
    async fn reject_mechanic(&self, id: &RecordId) -> Result<Mechanic, ApiError>;

    /// Suspend an approved mechanic.
    async fn suspend_mechanic(&self, id: &RecordId) -> Result<Mechanic, ApiError>;
}
