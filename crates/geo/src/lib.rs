//! Geospatial primitives for sportspot.
//!
//! This crate provides:
//! - The [`Coordinate`] value type
//! - Haversine great-circle distance
//! - Lenient coordinate parsing for backend rows (numbers, numeric strings,
//!   GeoJSON points and WKT `POINT` strings)
//!
//! # Example
//!
//! ```
//! use sportspot_geo::{distance_km, Coordinate};
//!
//! let gym = Coordinate::new(13.75, 100.50);
//! let park = Coordinate::new(13.80, 100.50);
//!
//! let km = distance_km(&gym, &park);
//! assert!((km - 5.56).abs() < 0.01);
//! ```

mod error;
mod haversine;
mod parse;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{distance_km, distance_m, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use parse::{coordinate_from_fields, parse_coordinate, parse_degrees};

/// A geographic coordinate in decimal degrees.
///
/// Latitude is expected in `-90..=90` and longitude in `-180..=180`. The
/// distance functions do not check this; callers that accept untrusted input
/// should go through [`coordinate_from_fields`] or [`Coordinate::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both components are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Distance to `other` in kilometers.
    #[inline]
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        distance_km(self, other)
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (13.75, 100.50).into();
        assert_eq!(coord.latitude, 13.75);
        assert_eq!(coord.longitude, 100.50);
    }

    #[test]
    fn test_display_is_lat_lng() {
        assert_eq!(Coordinate::new(13.75, 100.5).to_string(), "13.750000,100.500000");
    }
}
