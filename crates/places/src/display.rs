//! Presentation helpers.

use sportspot_geo::Coordinate;

/// Human-readable distance: meters below 1 km, one decimal above.
///
/// ```
/// use sportspot_places::format_distance;
///
/// assert_eq!(format_distance(0.4321), "432 m");
/// assert_eq!(format_distance(5.5597), "5.6 km");
/// ```
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.1} km")
    }
}

/// Link that opens the external maps application at `coordinate`.
pub fn maps_url(coordinate: &Coordinate) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        coordinate.latitude, coordinate.longitude
    )
}
