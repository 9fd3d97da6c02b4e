//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Backend resources each get one async port; the HTTP adapters in
//! `outbound::http` implement them all. Session persistence is a separate
//! synchronous port.

mod macros;
pub(crate) use macros::define_port_error;

mod api_error;
mod auth_gateway;
mod feedback_inbox;
mod mechanic_directory;
mod monitoring_feed;
mod service_catalogue;
mod service_request_book;
mod session_storage;
mod user_directory;

pub use api_error::ApiError;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::AuthGateway;
#[cfg(test)]
pub use feedback_inbox::MockFeedbackInbox;
pub use feedback_inbox::FeedbackInbox;
#[cfg(test)]
pub use mechanic_directory::MockMechanicDirectory;
pub use mechanic_directory::MechanicDirectory;
#[cfg(test)]
pub use monitoring_feed::MockMonitoringFeed;
pub use monitoring_feed::MonitoringFeed;
#[cfg(test)]
pub use service_catalogue::MockServiceCatalogue;
pub use service_catalogue::ServiceCatalogue;
#[cfg(test)]
pub use service_request_book::MockServiceRequestBook;
pub use service_request_book::ServiceRequestBook;
#[cfg(test)]
pub use session_storage::MockSessionStorage;
pub use session_storage::{InMemorySessionStorage, SessionStorage, SessionStorageError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
