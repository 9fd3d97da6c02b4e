//! Port for moderating customer feedback.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{Feedback, FeedbackForm, RecordId};

/// Reads and moderates feedback.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackInbox: Send + Sync {
    /// Every feedback entry.
    async fn list_feedback(&self) -> Result<Vec<Feedback>, ApiError>;

    /// Edit the comment or rating of an entry.
    async fn update_feedback(
        &self,
        id: &RecordId,
        form: &FeedbackForm,
    ) -> Result<Feedback, ApiError>;

    /// Remove an entry.
    async fn delete_feedback(&self, id: &RecordId) -> Result<(), ApiError>;
}
