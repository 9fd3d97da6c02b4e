//! Domain primitives, use-cases, and ports.
//!
//! Purpose: model the garage CRM records the console works with and the
//! rules around them (form validation, route access, session lifecycle,
//! query caching) without any knowledge of HTTP or the filesystem.
//!
//! Public surface:
//! - Records: [`User`], [`Mechanic`], [`Service`], [`ServiceRequest`],
//!   [`Feedback`], [`MonitoringSnapshot`].
//! - Forms: [`Draft`] implementations seeded from records.
//! - Use-cases: [`CrmService`], [`AuthService`], [`SessionContext`].
//! - Ports: see [`ports`].

pub mod auth;
pub mod auth_service;
pub mod crm_service;
pub mod feedback;
pub mod forms;
pub mod listings;
pub mod mechanic;
pub mod monitoring;
pub mod navigation;
pub mod ports;
pub mod price;
pub mod query_cache;
pub mod record_id;
pub mod role;
pub mod service_request;
pub mod services;
pub mod session;
pub mod timestamp;
pub mod user;

pub use self::auth::{
    LoginCredentials, MIN_PASSWORD_LEN, Registration, RegistrationInput, SignInResponse,
    SignedInAccount,
};
pub use self::auth_service::{AuthError, AuthService};
pub use self::crm_service::{CrmPorts, CrmService, MechanicTransition};
pub use self::feedback::{Feedback, FeedbackForm};
pub use self::forms::{Draft, FormError};
pub use self::mechanic::{Mechanic, MechanicForm};
pub use self::monitoring::MonitoringSnapshot;
pub use self::navigation::{Area, NavItem, Route, RouteAccess, Shell, UnknownRoute, authorize};
pub use self::price::Price;
pub use self::query_cache::{QueryCache, QueryKey, QueryStatus};
pub use self::record_id::RecordId;
pub use self::role::Role;
pub use self::service_request::{
    NewServiceRequest, RelatedRecord, ServiceRequest, ServiceRequestForm,
};
pub use self::services::{Service, ServiceForm};
pub use self::session::{SESSION_KEY, SessionContext, SessionUser};
pub use self::timestamp::Timestamp;
pub use self::user::{User, UserForm};
