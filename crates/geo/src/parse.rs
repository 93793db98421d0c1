//! Lenient coordinate parsing for backend rows.
//!
//! Place rows arrive from more than one backend and not always with numeric
//! columns. Accepted shapes:
//! - plain numbers or numeric strings per component (`13.75`, `"13.75"`)
//! - GeoJSON: `{"type": "Point", "coordinates": [lng, lat]}`
//! - objects with `latitude`/`longitude` or `lat`/`lng`/`lon` keys
//! - WKT: `POINT(lng lat)`

use crate::{Coordinate, GeoError, Result};
use serde_json::Value;

/// Reads one coordinate component from a number or a numeric string.
///
/// Returns `None` for null, empty strings, non-numeric text and non-finite
/// values.
pub fn parse_degrees(value: &Value) -> Option<f64> {
    let degrees = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    degrees.is_finite().then_some(degrees)
}

/// Builds a validated coordinate from separate latitude and longitude fields.
///
/// # Example
/// ```
/// use sportspot_geo::coordinate_from_fields;
/// use serde_json::json;
///
/// let coord = coordinate_from_fields(&json!("13.75"), &json!(100.5)).unwrap();
/// assert_eq!(coord.latitude, 13.75);
/// ```
pub fn coordinate_from_fields(latitude: &Value, longitude: &Value) -> Result<Coordinate> {
    let lat = parse_degrees(latitude)
        .ok_or_else(|| GeoError::InvalidCoordinate(format!("latitude {latitude}")))?;
    let lng = parse_degrees(longitude)
        .ok_or_else(|| GeoError::InvalidCoordinate(format!("longitude {longitude}")))?;

    let coord = Coordinate::new(lat, lng);
    if coord.is_valid() {
        Ok(coord)
    } else {
        Err(GeoError::OutOfRange { latitude: lat, longitude: lng })
    }
}

/// Parses a single JSON value holding a whole point.
///
/// Returns `None` when the value is null or in no recognised shape.
pub fn parse_coordinate(value: &Value) -> Option<Coordinate> {
    match value {
        Value::Object(map) => {
            if let Some(coords) = map.get("coordinates").and_then(Value::as_array) {
                if coords.len() >= 2 {
                    return coordinate_from_fields(&coords[1], &coords[0]).ok();
                }
                return None;
            }

            let lat = map.get("latitude").or_else(|| map.get("lat"))?;
            let lng = map
                .get("longitude")
                .or_else(|| map.get("lng"))
                .or_else(|| map.get("lon"))?;
            coordinate_from_fields(lat, lng).ok()
        }
        Value::String(wkt) => parse_wkt_point(wkt).ok(),
        _ => None,
    }
}

/// Parses `POINT(lng lat)`.
fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let wkt = wkt.trim();
    let body = wkt
        .strip_prefix("POINT")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| GeoError::InvalidWkt(format!("Expected POINT, got: {wkt}")))?;

    let parts: Vec<&str> = body.split_whitespace().collect();
    let [lng, lat] = parts.as_slice() else {
        return Err(GeoError::InvalidWkt(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    };

    coordinate_from_fields(&Value::from(*lat), &Value::from(*lng))
}
