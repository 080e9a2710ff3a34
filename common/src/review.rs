use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest star rating a review can carry.
pub const MAX_RATING: u8 = 5;

/// A customer review. Independent of products and purely additive; there is
/// no edit or delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub customer_name: String,
    pub review_text: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Build a review stamped now, clamping the rating to `0..=MAX_RATING`.
    pub fn new(customer_name: &str, review_text: &str, rating: u8) -> Review {
        Review {
            customer_name: customer_name.to_string(),
            review_text: review_text.to_string(),
            rating: rating.min(MAX_RATING),
            created_at: Utc::now(),
        }
    }
}
