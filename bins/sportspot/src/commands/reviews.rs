//! `sportspot reviews`

use crate::context::AppContext;
use crate::output::{self, Status};
use anyhow::Result;
use sportspot_places::{validate_review, ReviewStore};

pub async fn list(ctx: &AppContext, place_id: &str) -> Result<()> {
    let reviews = ctx.reviews()?.list(place_id).await?;

    if ctx.json {
        return output::print_json(&serde_json::to_value(&reviews)?);
    }
    if reviews.is_empty() {
        Status::info(&format!("No reviews for #{place_id} yet."));
    } else {
        Status::header(&format!("Reviews for #{place_id}"));
        output::print_reviews(&reviews);
    }
    Ok(())
}

pub async fn add(ctx: &AppContext, place_id: &str, rating: u8, comment: &str) -> Result<()> {
    // Fail on bad input before any network configuration is needed.
    validate_review(rating, comment)?;
    let review = ctx.reviews()?.add(place_id, rating, comment).await?;

    if ctx.json {
        return output::print_json(&serde_json::to_value(&review)?);
    }
    Status::success(&format!("Review #{} added", review.id));
    Ok(())
}

pub async fn update(ctx: &AppContext, review_id: &str, rating: u8, comment: &str) -> Result<()> {
    validate_review(rating, comment)?;
    let review = ctx.reviews()?.update(review_id, rating, comment).await?;

    if ctx.json {
        return output::print_json(&serde_json::to_value(&review)?);
    }
    Status::success(&format!("Review #{} updated", review.id));
    Ok(())
}

pub async fn delete(ctx: &AppContext, review_id: &str) -> Result<()> {
    ctx.reviews()?.delete(review_id).await?;

    if ctx.json {
        return output::print_json(&serde_json::json!({ "deleted": review_id }));
    }
    Status::success(&format!("Review #{review_id} deleted"));
    Ok(())
}
