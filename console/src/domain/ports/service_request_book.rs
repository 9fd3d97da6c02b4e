//! Port for customer service requests.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{NewServiceRequest, RecordId, ServiceRequest, ServiceRequestForm};

/// Reads and changes bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRequestBook: Send + Sync {
    /// Every booking.
    async fn list_service_requests(&self) -> Result<Vec<ServiceRequest>, ApiError>;

    /// Book a service.
    async fn create_service_request(
        &self,
        request: &NewServiceRequest,
    ) -> Result<ServiceRequest, ApiError>;

    /// Change the status, schedule, or terms of a booking.
    async fn update_service_request(
        &self,
        id: &RecordId,
        form: &ServiceRequestForm,
    ) -> Result<ServiceRequest, ApiError>;

    /// Remove a booking.
    async fn delete_service_request(&self, id: &RecordId) -> Result<(), ApiError>;
}
