//! Filter pipeline over a ranked list.
//!
//! Three steps, always in this order:
//! 1. text: case-insensitive substring of name or category
//! 2. radius: distance known and within `radius_km` (fail-closed without one)
//! 3. limit: keep the first `limit` entries
//!
//! Steps 1 and 2 look at disjoint fields, so swapping them would not change
//! the result. Only the limit is order-sensitive, and it runs last.

use crate::place::RankedPlace;
use serde::{Deserialize, Serialize};

/// Filter inputs, snapshotted per recomputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Substring to look for; blank means no text filter
    #[serde(default)]
    pub search_text: String,
    /// Keep only places within this many kilometers of the origin
    #[serde(default)]
    pub radius_km: Option<f64>,
    /// Keep at most this many places
    #[serde(default)]
    pub limit: Option<usize>,
}

impl FilterParams {
    /// No filtering at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    #[must_use]
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Set the radius cutoff
    #[must_use]
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Set the top-N window
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Normalized query, or `None` when the text filter is off
    fn needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }
}

/// Whether `place` matches an already lower-cased, non-empty needle.
pub(crate) fn matches_text(place: &RankedPlace, needle: &str) -> bool {
    place.place.name.to_lowercase().contains(needle)
        || place.place.category.to_lowercase().contains(needle)
}

/// Run the pipeline. Pure and idempotent.
///
/// A radius with no known distance yields an empty list rather than an error.
/// A radius that is negative or NaN matches nothing; `limit = Some(0)` keeps
/// nothing.
pub fn apply(mut ranked: Vec<RankedPlace>, params: &FilterParams) -> Vec<RankedPlace> {
    if let Some(needle) = params.needle() {
        ranked.retain(|p| matches_text(p, &needle));
    }

    if let Some(radius_km) = params.radius_km {
        ranked.retain(|p| p.distance_km.is_some_and(|d| d <= radius_km));
    }

    if let Some(limit) = params.limit {
        ranked.truncate(limit);
    }

    ranked
}
