//! Port for platform activity counters.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::MonitoringSnapshot;

/// Supplies the admin dashboard counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MonitoringFeed: Send + Sync {
    /// Latest counters.
    async fn snapshot(&self) -> Result<MonitoringSnapshot, ApiError>;
}
