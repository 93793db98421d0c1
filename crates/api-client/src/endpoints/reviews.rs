//! Supabase `reviews` table

use super::{id_string, text};
use crate::client::SportspotClient;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sportspot_places::{validate_review, PlaceError, Result, Review, ReviewStore};
use tracing::{info, instrument, warn};

const TABLE: &str = "reviews";

/// Review store over the Supabase REST API.
#[derive(Clone)]
pub struct SupabaseReviews {
    client: SportspotClient,
}

#[derive(Serialize)]
struct NewReview<'a> {
    place_id: &'a str,
    rating: u8,
    comment: &'a str,
}

#[derive(Serialize)]
struct ReviewPatch<'a> {
    rating: u8,
    comment: &'a str,
}

impl SupabaseReviews {
    pub(crate) fn new(client: SportspotClient) -> Self {
        Self { client }
    }

    fn by_id(&self, review_id: &str) -> Result<String> {
        let filter = format!("eq.{review_id}");
        Ok(self.client.rest_url(TABLE, &[("id", &filter)])?)
    }
}

#[async_trait]
impl ReviewStore for SupabaseReviews {
    #[instrument(skip(self))]
    async fn list(&self, place_id: &str) -> Result<Vec<Review>> {
        let filter = format!("eq.{place_id}");
        let url = self.client.rest_url(
            TABLE,
            &[("select", "*"), ("place_id", &filter), ("order", "created_at.desc")],
        )?;
        let rows: Vec<Value> = self.client.get_url(&url).await?;
        Ok(rows.iter().filter_map(review_from_row).collect())
    }

    #[instrument(skip(self, comment))]
    async fn add(&self, place_id: &str, rating: u8, comment: &str) -> Result<Review> {
        validate_review(rating, comment)?;
        let url = self.client.rest_url(TABLE, &[])?;
        let body = NewReview { place_id, rating, comment: comment.trim() };

        let rows: Vec<Value> = self.client.post_url(&url, &body).await?;
        let review = rows
            .iter()
            .find_map(review_from_row)
            .ok_or_else(|| PlaceError::Repository("insert returned no row".into()))?;
        info!(review_id = %review.id, "review added");
        Ok(review)
    }

    #[instrument(skip(self, comment))]
    async fn update(&self, review_id: &str, rating: u8, comment: &str) -> Result<Review> {
        validate_review(rating, comment)?;
        let url = self.by_id(review_id)?;
        let body = ReviewPatch { rating, comment: comment.trim() };

        let rows: Vec<Value> = self.client.patch_url(&url, &body).await?;
        rows.iter()
            .find_map(review_from_row)
            .ok_or_else(|| PlaceError::NotFound(review_id.to_string()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, review_id: &str) -> Result<()> {
        let url = self.by_id(review_id)?;
        self.client.delete_url(&url).await?;
        info!(review_id, "review deleted");
        Ok(())
    }
}

/// Builds a review from a loosely typed row.
pub(crate) fn review_from_row(row: &Value) -> Option<Review> {
    let id = row.get("id").and_then(id_string)?;
    let place_id = row.get("place_id").and_then(id_string)?;

    let rating = row
        .get("rating")
        .and_then(|v| v.as_u64().or_else(|| v.as_str()?.trim().parse().ok()))
        .and_then(|r| u8::try_from(r).ok());
    let Some(rating) = rating else {
        warn!(%id, "skipping review with unreadable rating");
        return None;
    };

    let created_at = text(row, "created_at")
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|t| t.with_timezone(&Utc));

    Some(Review {
        id,
        place_id,
        rating,
        comment: text(row, "comment").unwrap_or_default(),
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;

    #[test]
    fn test_review_row() {
        let row = json!({
            "id": 12,
            "place_id": "7",
            "rating": 4,
            "comment": "Good lighting",
            "created_at": "2024-05-01T10:00:00+00:00"
        });
        let review = review_from_row(&row).unwrap();
        assert_eq!(review.id, "12");
        assert_eq!(review.place_id, "7");
        assert_eq!(review.rating, 4);
        assert_eq!(review.created_at.unwrap().to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_review_row_without_rating_is_skipped() {
        assert!(review_from_row(&json!({"id": 1, "place_id": 2, "rating": "five"})).is_none());
        assert!(review_from_row(&json!({"id": 1, "place_id": 2, "rating": 900})).is_none());
    }

    #[test]
    fn test_invalid_review_rejected_before_io() {
        // Unroutable host: reaching the network would fail differently.
        let client = SportspotClient::with_config(
            ClientConfig::development().with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();
        let reviews = client.reviews();

        let err = tokio_test::block_on(reviews.add("7", 0, "bad")).unwrap_err();
        assert!(matches!(err, PlaceError::InvalidReview(_)));
        let err = tokio_test::block_on(reviews.update("1", 3, "  ")).unwrap_err();
        assert!(matches!(err, PlaceError::InvalidReview(_)));
    }
}
