//! Cached queries and invalidating mutations over the backend ports.
//!
//! Every list read goes through the [`QueryCache`]. Every write calls exactly
//! one port method and, on success, invalidates the key of the collection it
//! changed. Failed writes leave the cache untouched and are not retried.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use super::ports::{
    ApiError, FeedbackInbox, MechanicDirectory, MonitoringFeed, ServiceCatalogue,
    ServiceRequestBook, UserDirectory,
};
use super::query_cache::{QueryCache, QueryKey, QueryStatus};
use super::{
    Feedback, FeedbackForm, Mechanic, MechanicForm, MonitoringSnapshot, NewServiceRequest,
    RecordId, Service, ServiceForm, ServiceRequest, ServiceRequestForm, User, UserForm,
};

/// Backend ports used by [`CrmService`].
#[derive(Clone)]
pub struct CrmPorts {
    /// Mechanic records.
    pub mechanics: Arc<dyn MechanicDirectory>,
    /// Service catalogue.
    pub services: Arc<dyn ServiceCatalogue>,
    /// Service requests.
    pub service_requests: Arc<dyn ServiceRequestBook>,
    /// Feedback moderation.
    pub feedback: Arc<dyn FeedbackInbox>,
    /// Accounts.
    pub users: Arc<dyn UserDirectory>,
    /// Dashboard counters.
    pub monitoring: Arc<dyn MonitoringFeed>,
}

/// Mechanic lifecycle transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MechanicTransition {
    /// Accept a pending application.
    Approve,
    /// Decline a pending application.
    Reject,
    /// Suspend an active mechanic.
    Suspend,
}

impl MechanicTransition {
    /// Past-tense verb for notices.
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
            Self::Suspend => "suspended",
        }
    }
}

/// Query and mutation entry point used by every console screen.
pub struct CrmService {
    ports: CrmPorts,
    cache: QueryCache,
}

impl CrmService {
    /// Create a service over `ports` with an empty `cache`.
    pub fn new(ports: CrmPorts, cache: QueryCache) -> Self {
        Self { ports, cache }
    }

    /// State of one cached collection.
    #[must_use]
    pub fn status(&self, key: QueryKey) -> QueryStatus {
        self.cache.status(key)
    }

    async fn mutate<T, Fut>(&self, key: QueryKey, action: &'static str, call: Fut) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match call.await {
            Ok(value) => {
                self.cache.invalidate(key);
                info!(key = key.as_str(), action, "mutation succeeded");
                Ok(value)
            }
            Err(error) => {
                warn!(key = key.as_str(), action, kind = error.kind(), %error, "mutation failed");
                Err(error)
            }
        }
    }

    /// All mechanics.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed fetch.
    pub async fn mechanics(&self) -> Result<Arc<Vec<Mechanic>>, ApiError> {
        self.cache
            .fetch(QueryKey::Mechanics, || self.ports.mechanics.list_mechanics())
            .await
    }

    /// All services.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed fetch.
    pub async fn services(&self) -> Result<Arc<Vec<Service>>, ApiError> {
        self.cache
            .fetch(QueryKey::Services, || self.ports.services.list_services())
            .await
    }

    /// All service requests.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed fetch.
    pub async fn service_requests(&self) -> Result<Arc<Vec<ServiceRequest>>, ApiError> {
        self.cache
            .fetch(QueryKey::ServiceRequests, || self.ports.service_requests.list_service_requests())
            .await
    }

    /// All feedback.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed fetch.
    pub async fn feedback(&self) -> Result<Arc<Vec<Feedback>>, ApiError> {
        self.cache
            .fetch(QueryKey::Feedbacks, || self.ports.feedback.list_feedback())
            .await
    }

    /// All user accounts.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed fetch.
    pub async fn users(&self) -> Result<Arc<Vec<User>>, ApiError> {
        self.cache
            .fetch(QueryKey::Profiles, || self.ports.users.list_users())
            .await
    }

    /// Dashboard counters.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed fetch.
    pub async fn monitoring(&self) -> Result<Arc<MonitoringSnapshot>, ApiError> {
        self.cache
            .fetch(QueryKey::Monitoring, || self.ports.monitoring.snapshot())
            .await
    }

    /// Register a mechanic.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn create_mechanic(&self, form: &MechanicForm) -> Result<Mechanic, ApiError> {
        self.mutate(
            QueryKey::Mechanics,
            "create_mechanic",
            self.ports.mechanics.create_mechanic(form),
        )
        .await
    }

    /// Update a mechanic.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn update_mechanic(
        &self,
        id: &RecordId,
        form: &MechanicForm,
    ) -> Result<Mechanic, ApiError> {
        self.mutate(
            QueryKey::Mechanics,
            "update_mechanic",
            self.ports.mechanics.update_mechanic(id, form),
        )
        .await
    }

    /// Delete a mechanic.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn delete_mechanic(&self, id: &RecordId) -> Result<(), ApiError> {
        self.mutate(
            QueryKey::Mechanics,
            "delete_mechanic",
            self.ports.mechanics.delete_mechanic(id),
        )
        .await
    }

    /// Move a mechanic through its approval lifecycle.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn transition_mechanic(
        &self,
        id: &RecordId,
        transition: MechanicTransition,
    ) -> Result<Mechanic, ApiError> {
        let port = &self.ports.mechanics;
        match transition {
            MechanicTransition::Approve => {
                self.mutate(QueryKey::Mechanics, "approve_mechanic", port.approve_mechanic(id))
                    .await
            }
            MechanicTransition::Reject => {
                self.mutate(QueryKey::Mechanics, "reject_mechanic", port.reject_mechanic(id))
                    .await
            }
            MechanicTransition::Suspend => {
                self.mutate(QueryKey::Mechanics, "suspend_mechanic", port.suspend_mechanic(id))
                    .await
            }
        }
    }

    /// Add a service.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn create_service(&self, form: &ServiceForm) -> Result<Service, ApiError> {
        self.mutate(
            QueryKey::Services,
            "create_service",
            self.ports.services.create_service(form),
        )
        .await
    }

    /// Update a service.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn update_service(
        &self,
        id: &RecordId,
        form: &ServiceForm,
    ) -> Result<Service, ApiError> {
        self.mutate(
            QueryKey::Services,
            "update_service",
            self.ports.services.update_service(id, form),
        )
        .await
    }

    /// Delete a service.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn delete_service(&self, id: &RecordId) -> Result<(), ApiError> {
        self.mutate(
            QueryKey::Services,
            "delete_service",
            self.ports.services.delete_service(id),
        )
        .await
    }

    /// Book a service.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn create_service_request(
        &self,
        request: &NewServiceRequest,
    ) -> Result<ServiceRequest, ApiError> {
        self.mutate(
            QueryKey::ServiceRequests,
            "create_service_request",
            self.ports.service_requests.create_service_request(request),
        )
        .await
    }

    /// Update a booking.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn update_service_request(
        &self,
        id: &RecordId,
        form: &ServiceRequestForm,
    ) -> Result<ServiceRequest, ApiError> {
        self.mutate(
            QueryKey::ServiceRequests,
            "update_service_request",
            self.ports.service_requests.update_service_request(id, form),
        )
        .await
    }

    /// Delete a booking.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn delete_service_request(&self, id: &RecordId) -> Result<(), ApiError> {
        self.mutate(
            QueryKey::ServiceRequests,
            "delete_service_request",
            self.ports.service_requests.delete_service_request(id),
        )
        .await
    }

    /// Moderate a feedback entry.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn update_feedback(
        &self,
        id: &RecordId,
        form: &FeedbackForm,
    ) -> Result<Feedback, ApiError> {
        self.mutate(
            QueryKey::Feedbacks,
            "update_feedback",
            self.ports.feedback.update_feedback(id, form),
        )
        .await
    }

    /// Delete a feedback entry.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn delete_feedback(&self, id: &RecordId) -> Result<(), ApiError> {
        self.mutate(
            QueryKey::Feedbacks,
            "delete_feedback",
            self.ports.feedback.delete_feedback(id),
        )
        .await
    }

    /// Update an account.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn update_user(&self, id: &RecordId, form: &UserForm) -> Result<User, ApiError> {
        self.mutate(
            QueryKey::Profiles,
            "update_user",
            self.ports.users.update_user(id, form),
        )
        .await
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns the backend [`ApiError`]; the cache is left unchanged.
    pub async fn delete_user(&self, id: &RecordId) -> Result<(), ApiError> {
        self.mutate(
            QueryKey::Profiles,
            "delete_user",
            self.ports.users.delete_user(id),
        )
        .await
    }
}

#[cfg(test)]
#[path = "crm_service_tests.rs"]
mod tests;
