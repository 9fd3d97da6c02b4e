//! Customer feedback left for mechanics.

use serde::{Deserialize, Serialize};

use super::forms::{Draft, FormError, require};
use super::{RecordId, Timestamp};

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// One review of a mechanic by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Backend identifier.
    pub id: RecordId,
    /// Mechanic reviewed.
    pub mechanic_id: RecordId,
    /// Reviewing customer.
    pub user_id: RecordId,
    /// Star rating.
    pub rating: u8,
    /// Review text.
    #[serde(default)]
    pub comment: String,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Moderation edit of a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackForm {
    /// Review text.
    pub comment: String,
    /// Star rating.
    pub rating: u8,
}

impl From<&Feedback> for FeedbackForm {
    fn from(feedback: &Feedback) -> Self {
        Self {
            comment: feedback.comment.clone(),
            rating: feedback.rating,
        }
    }
}

impl Draft for FeedbackForm {
    const FIELDS: &'static [&'static str] = &["comment", "rating"];

    fn assign(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "comment" => self.comment = value.trim().to_owned(),
            "rating" => {
                self.rating = value
                    .trim()
                    .parse()
                    .map_err(|_| FormError::invalid(field, "a rating from 1 to 5", value))?;
            }
            other => return Err(FormError::unknown(other, Self::FIELDS)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FormError> {
        require("comment", &self.comment)?;
        if (MIN_RATING..=MAX_RATING).contains(&self.rating) {
            Ok(())
        } else {
            Err(FormError::invalid(
                "rating",
                "a rating from 1 to 5",
                &self.rating.to_string(),
            ))
        }
    }
}
