//! Port for the bookable service catalogue.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{RecordId, Service, ServiceForm};

/// Reads and changes catalogue entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceCatalogue: Send + Sync {
    /// Every service.
    async fn list_services(&self) -> Result<Vec<Service>, ApiError>;

    /// Add a service.
    async fn create_service(&self, form: &ServiceForm) -> Result<Service, ApiError>;

    /// Replace the editable fields of a service.
    async fn update_service(&self, id: &RecordId, form: &ServiceForm)
    -> Result<Service, ApiError>;

    /// Remove a service.
    async fn delete_service(&self, id: &RecordId) -> Result<(), ApiError>;
}
