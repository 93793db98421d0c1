//! Error types for the places crate.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for place operations.
pub type Result<T> = std::result::Result<T, PlaceError>;

/// Failures at the collaborator boundaries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlaceError {
    /// Location permission was not granted
    #[error("Location permission denied")]
    PermissionDenied,

    /// Permission granted but no fix could be obtained
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// Remote or local place source failed
    #[error("Place source error: {0}")]
    Repository(String),

    /// A single place lookup found nothing
    #[error("Place not found: {0}")]
    NotFound(String),

    /// Favorites or key-value storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Review rejected before it reached the store
    #[error("Invalid review: {0}")]
    InvalidReview(String),
}

/// Error codes for place errors.
/// Range: 11xxx.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceErrorCode {
    /// Location permission denied
    PermissionDenied = 11001,
    /// No location fix
    LocationUnavailable = 11002,
    /// Place source failure
    Repository = 11003,
    /// Place not found
    NotFound = 11004,
    /// Storage failure
    Storage = 11005,
    /// Invalid review input
    InvalidReview = 11006,
}

impl PlaceError {
    /// Returns the error code for this error.
    pub fn code(&self) -> PlaceErrorCode {
        match self {
            PlaceError::PermissionDenied => PlaceErrorCode::PermissionDenied,
            PlaceError::LocationUnavailable(_) => PlaceErrorCode::LocationUnavailable,
            PlaceError::Repository(_) => PlaceErrorCode::Repository,
            PlaceError::NotFound(_) => PlaceErrorCode::NotFound,
            PlaceError::Storage(_) => PlaceErrorCode::Storage,
            PlaceError::InvalidReview(_) => PlaceErrorCode::InvalidReview,
        }
    }

    /// Whether calling `refresh()` or repeating the action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlaceError::LocationUnavailable(_) | PlaceError::Repository(_) | PlaceError::Storage(_)
        )
    }

    /// Snapshot for the status descriptor.
    pub fn descriptor(&self) -> ErrorDescriptor {
        ErrorDescriptor {
            code: self.code(),
            message: self.to_string(),
            retryable: self.is_retryable(),
        }
    }
}

impl From<std::io::Error> for PlaceError {
    fn from(err: std::io::Error) -> Self {
        PlaceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PlaceError {
    fn from(err: serde_json::Error) -> Self {
        PlaceError::Storage(format!("corrupt stored data: {err}"))
    }
}

/// Displayable error attached to the session status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDescriptor {
    /// Error code
    pub code: PlaceErrorCode,
    /// Human-readable message
    pub message: String,
    /// Whether a refresh may clear it
    pub retryable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classes() {
        assert!(!PlaceError::PermissionDenied.is_retryable());
        assert!(PlaceError::LocationUnavailable("timeout".into()).is_retryable());
        assert!(PlaceError::Repository("503".into()).is_retryable());
        assert!(!PlaceError::NotFound("9".into()).is_retryable());
    }

    #[test]
    fn test_descriptor() {
        let d = PlaceError::Repository("offline".into()).descriptor();
        assert_eq!(d.code, PlaceErrorCode::Repository);
        assert_eq!(d.message, "Place source error: offline");
        assert!(d.retryable);
        assert_eq!(PlaceErrorCode::Repository as u32, 11003);
    }
}
