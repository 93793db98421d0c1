//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while reading coordinates from external data.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid WKT format
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// Coordinate component missing or not numeric
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Coordinate parsed but outside the valid degree range
    #[error("Coordinate out of range: lat={latitude}, lng={longitude}")]
    OutOfRange {
        /// Parsed latitude
        latitude: f64,
        /// Parsed longitude
        longitude: f64,
    },
}

/// Error codes for geo errors.
/// Range: 10xxx.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid WKT format
    InvalidWkt = 10001,
    /// Invalid coordinate values
    InvalidCoordinate = 10002,
    /// Coordinate out of range
    OutOfRange = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidWkt(_) => GeoErrorCode::InvalidWkt,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::OutOfRange { .. } => GeoErrorCode::OutOfRange,
        }
    }
}
