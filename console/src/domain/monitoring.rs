//! Platform activity counters shown on the admin dashboard.

use serde::{Deserialize, Serialize};

/// Counters reported by the monitoring endpoint.
///
/// Missing counters decode as `None` and render as `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSnapshot {
    /// Accounts active in the reporting window.
    #[serde(default)]
    pub active_users: Option<u64>,
    /// Mechanics active in the reporting window.
    #[serde(default)]
    pub active_mechanics: Option<u64>,
    /// Services listed.
    #[serde(default)]
    pub total_services: Option<u64>,
    /// Feedback entries received.
    #[serde(default)]
    pub total_feedbacks: Option<u64>,
}

impl MonitoringSnapshot {
    /// Labelled counters in dashboard order.
    #[must_use]
    pub fn metrics(&self) -> [(&'static str, Option<u64>); 4] {
        [
            ("Active Users", self.active_users),
            ("Active Mechanics", self.active_mechanics),
            ("Total Services", self.total_services),
            ("Total Feedbacks", self.total_feedbacks),
        ]
    }
}
