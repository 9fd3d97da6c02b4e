//! Port implementations for each backend resource.
//!
//! Paths mirror the backend routes one-to-one; every call goes through the
//! shared helpers on [`BackendApi`].

use async_trait::async_trait;
use reqwest::Method;

use super::BackendApi;
use super::dto::{ListPayload, MonitoringPayload, RegisterBody, SignInBody, SignInResponseDto};
use crate::domain::ports::{
    ApiError, AuthGateway, FeedbackInbox, MechanicDirectory, MonitoringFeed, ServiceCatalogue,
    ServiceRequestBook, UserDirectory,
};
use crate::domain::{
    Feedback, FeedbackForm, LoginCredentials, Mechanic, MechanicForm, MonitoringSnapshot,
    NewServiceRequest, RecordId, Registration, Service, ServiceForm, ServiceRequest,
    ServiceRequestForm, SignInResponse, User, UserForm,
};

const MECHANICS: &str = "mechanics";
const SERVICES: &str = "services";
const SERVICE_REQUESTS: &str = "service-requests";
const FEEDBACKS: &str = "feedbacks";
const USERS: &str = "users";

impl BackendApi {
    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        resource: &str,
    ) -> Result<Vec<T>, ApiError> {
        self.fetch::<ListPayload<T>>(Method::GET, &[resource])
            .await
            .map(ListPayload::into_vec)
    }
}

#[async_trait]
impl AuthGateway for BackendApi {
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignInResponse, ApiError> {
        self.submit::<_, SignInResponseDto>(
            Method::POST,
            &["auth", "signin"],
            &SignInBody::from(credentials),
        )
        .await
        .map(SignInResponse::from)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.submit_unit(
            Method::POST,
            &["auth", "register"],
            &RegisterBody::from(registration),
        )
        .await
    }
}

#[async_trait]
impl MechanicDirectory for BackendApi {
    async fn list_mechanics(&self) -> Result<Vec<Mechanic>, ApiError> {
        self.list(MECHANICS).await
    }

    async fn create_mechanic(&self, form: &MechanicForm) -> Result<Mechanic, ApiError> {
        self.submit(Method::POST, &[MECHANICS], form).await
    }

    async fn update_mechanic(
        &self,
        id: &RecordId,
        form: &MechanicForm,
    ) -> Result<Mechanic, ApiError> {
        let id = id.to_string();
        self.submit(Method::PATCH, &[MECHANICS, &id], form).await
    }

    async fn delete_mechanic(&self, id: &RecordId) -> Result<(), ApiError> {
        self.delete(&[MECHANICS, &id.to_string()]).await
    }

    async fn approve_mechanic(&self, id: &RecordId) -> Result<Mechanic, ApiError> {
        self.fetch(Method::POST, &[MECHANICS, &id.to_string(), "approve"])
            .await
    }

    async fn reject_mechanic(&self, id: &RecordId) -> Result<Mechanic, ApiError> {
        self.fetch(Method::PATCH, &[MECHANICS, &id.to_string(), "reject"])
            .await
    }

    async fn suspend_mechanic(&self, id: &RecordId) -> Result<Mechanic, ApiError> {
        self.fetch(Method::PATCH, &[MECHANICS, &id.to_string(), "suspend"])
            .await
    }
}

#[async_trait]
impl ServiceCatalogue for BackendApi {
    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.list(SERVICES).await
    }

    async fn create_service(&self, form: &ServiceForm) -> Result<Service, ApiError> {
        self.submit(Method::POST, &[SERVICES], form).await
    }

    async fn update_service(
        &self,
        id: &RecordId,
        form: &ServiceForm,
    ) -> Result<Service, ApiError> {
        let id = id.to_string();
        self.submit(Method::PATCH, &[SERVICES, &id], form).await
    }

    async fn delete_service(&self, id: &RecordId) -> Result<(), ApiError> {
        self.delete(&[SERVICES, &id.to_string()]).await
    }
}

#[async_trait]
impl ServiceRequestBook for BackendApi {
    async fn list_service_requests(&self) -> Result<Vec<ServiceRequest>, ApiError> {
        self.list(SERVICE_REQUESTS).await
    }

    async fn create_service_request(
        &self,
        request: &NewServiceRequest,
    ) -> Result<ServiceRequest, ApiError> {
        self.submit(Method::POST, &[SERVICE_REQUESTS], request)
            .await
    }

    async fn update_service_request(
        &self,
        id: &RecordId,
        form: &ServiceRequestForm,
    ) -> Result<ServiceRequest, ApiError> {
        let id = id.to_string();
        self.submit(Method::PATCH, &[SERVICE_REQUESTS, &id], form)
            .await
    }

    async fn delete_service_request(&self, id: &RecordId) -> Result<(), ApiError> {
        self.delete(&[SERVICE_REQUESTS, &id.to_string()]).await
    }
}

#[async_trait]
impl FeedbackInbox for BackendApi {
    async fn list_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        self.list(FEEDBACKS).await
    }

    async fn update_feedback(
        &self,
        id: &RecordId,
        form: &FeedbackForm,
    ) -> Result<Feedback, ApiError> {
        let id = id.to_string();
        self.submit(Method::PATCH, &[FEEDBACKS, &id], form).await
    }

    async fn delete_feedback(&self, id: &RecordId) -> Result<(), ApiError> {
        self.delete(&[FEEDBACKS, &id.to_string()]).await
    }
}

#[async_trait]
impl UserDirectory for BackendApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.list(USERS).await
    }

    async fn update_user(&self, id: &RecordId, form: &UserForm) -> Result<User, ApiError> {
        let id = id.to_string();
        self.submit(Method::PATCH, &[USERS, &id], form).await
    }

    async fn delete_user(&self, id: &RecordId) -> Result<(), ApiError> {
        self.delete(&[USERS, &id.to_string()]).await
    }
}

#[async_trait]
impl MonitoringFeed for BackendApi {
    async fn snapshot(&self) -> Result<MonitoringSnapshot, ApiError> {
        self.fetch::<MonitoringPayload>(Method::GET, &["monitoring"])
            .await
            .map(MonitoringPayload::into_snapshot)
    }
}
