//! Place reviews.

use crate::error::{PlaceError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// A user review of a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier
    pub id: String,
    /// Reviewed place
    pub place_id: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    /// Free text
    pub comment: String,
    /// Creation time, when the store reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Review CRUD contract.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Reviews of `place_id`, newest first.
    async fn list(&self, place_id: &str) -> Result<Vec<Review>>;

    /// Create a review.
    async fn add(&self, place_id: &str, rating: u8, comment: &str) -> Result<Review>;

    /// Replace rating and comment of an existing review.
    async fn update(&self, review_id: &str, rating: u8, comment: &str) -> Result<Review>;

    /// Delete a review.
    async fn delete(&self, review_id: &str) -> Result<()>;
}

/// Reject a rating outside 1..=5 or a blank comment before any I/O.
pub fn validate_review(rating: u8, comment: &str) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(PlaceError::InvalidReview(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    if comment.trim().is_empty() {
        return Err(PlaceError::InvalidReview("comment is empty".into()));
    }
    Ok(())
}
