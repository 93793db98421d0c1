//! Place records and their derived forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sportspot_geo::Coordinate;
use std::sync::Arc;

/// A sports facility as supplied by a place source.
///
/// Places are immutable once loaded; ranking and filtering share them through
/// `Arc` instead of copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Identifier, unique within a session
    pub id: String,
    /// Display name
    pub name: String,
    /// Category tag ("stadium", "fitness_centre", ...)
    pub category: String,
    /// Position
    pub coordinate: Coordinate,
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Free-text opening hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Place {
    /// Creates a place with no optional details.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            coordinate,
            address: None,
            city: None,
            opening_hours: None,
            phone: None,
            image_url: None,
        }
    }

    /// Set the street address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the city
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set opening hours
    #[must_use]
    pub fn with_opening_hours(mut self, hours: impl Into<String>) -> Self {
        self.opening_hours = Some(hours.into());
        self
    }

    /// Set the phone number
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the image URL
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// A place annotated with its distance from the origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlace {
    /// The place itself
    #[serde(flatten)]
    pub place: Arc<Place>,
    /// Kilometers from the origin; `None` exactly when no origin is known
    pub distance_km: Option<f64>,
    /// 0-based position in the full ranked list; `None` without an origin
    pub rank: Option<usize>,
}

impl RankedPlace {
    /// Place identifier
    pub fn id(&self) -> &str {
        &self.place.id
    }

    /// Place name
    pub fn name(&self) -> &str {
        &self.place.name
    }
}

/// A favorited place, copied at the time it was saved.
///
/// Later changes to the source place do not propagate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Place identifier, the key of the favorites list
    pub id: String,
    /// Name at save time
    pub name: String,
    /// Position at save time
    pub coordinate: Coordinate,
    /// Category at save time
    pub category: String,
    /// City at save time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Image at save time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// When the entry was created
    pub saved_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// Snapshot a place as a favorite.
    pub fn from_place(place: &Place, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            coordinate: place.coordinate,
            category: place.category.clone(),
            city: place.city.clone(),
            image_url: place.image_url.clone(),
            saved_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_json_omits_empty_details() {
        let place =
            Place::new("7", "Rajamangala Stadium", "stadium", Coordinate::new(13.755, 100.622));
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["category"], "stadium");
        assert!(json.get("phone").is_none());

        let back: Place = serde_json::from_value(json).unwrap();
        assert_eq!(back, place);
    }

    #[test]
    fn test_ranked_place_flattens() {
        let ranked = RankedPlace {
            place: Arc::new(Place::new("1", "Central Gym", "gym", Coordinate::new(13.75, 100.5))),
            distance_km: Some(0.0),
            rank: Some(0),
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["distance_km"], 0.0);
    }

    #[test]
    fn test_favorite_is_a_copy() {
        let mut place = Place::new("1", "Central Gym", "gym", Coordinate::new(13.75, 100.5))
            .with_city("Bangkok");
        let entry = FavoriteEntry::from_place(&place, Utc::now());
        place.name = "Renamed Gym".to_string();

        assert_eq!(entry.name, "Central Gym");
        assert_eq!(entry.city.as_deref(), Some("Bangkok"));
    }
}
