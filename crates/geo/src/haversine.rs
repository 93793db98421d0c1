//! Haversine distance calculation.
//!
//! Great-circle distance on a spherical Earth. The haversine form works on
//! half-angle sines, so longitude deltas across the ±180° seam and points near
//! the poles need no special casing.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in kilometers.
///
/// Symmetric, and zero for identical inputs. Both coordinates are expected to
/// be within range (see [`Coordinate::is_valid`]); out-of-range values are not
/// checked and produce a meaningless but finite result.
///
/// # Example
/// ```
/// use sportspot_geo::{distance_km, Coordinate};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
/// assert!((distance_km(&a, &b) - 111.19).abs() < 0.5);
/// ```
#[inline]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_KM
}

/// Great-circle distance between two coordinates in meters.
#[inline]
pub fn distance_m(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_M
}

/// Central angle in radians between two points.
#[inline]
fn central_angle(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}
