//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    /// Search and filtering defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Location source settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Overpass source settings
    #[serde(default)]
    pub overpass: OverpassConfig,

    /// Favorites storage
    #[serde(default)]
    pub favorites: FavoritesConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check values that serde cannot constrain
    pub fn validate(&self) -> Result<()> {
        if !(self.search.nearby_radius_km.is_finite() && self.search.nearby_radius_km > 0.0) {
            return Err(Error::invalid_config(
                "search.nearby_radius_km",
                "must be a positive number",
            ));
        }
        if self.search.list_limit == 0 {
            return Err(Error::invalid_config("search.list_limit", "must be at least 1"));
        }
        if self.search.suggestion_limit == 0 {
            return Err(Error::invalid_config("search.suggestion_limit", "must be at least 1"));
        }
        if self.location.latitude.is_some() != self.location.longitude.is_some() {
            return Err(Error::invalid_config(
                "location",
                "latitude and longitude must be set together",
            ));
        }
        if self.overpass.radius_m == 0 {
            return Err(Error::invalid_config("overpass.radius_m", "must be at least 1"));
        }
        Ok(())
    }
}

/// Search and filtering defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Radius applied by the "nearby only" toggle
    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,

    /// Maximum places in the main list
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Maximum search suggestions
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            nearby_radius_km: default_nearby_radius_km(),
            list_limit: default_list_limit(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

fn default_nearby_radius_km() -> f64 {
    5.0
}

fn default_list_limit() -> usize {
    30
}

fn default_suggestion_limit() -> usize {
    5
}

/// Location watch options and an optional fixed position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationConfig {
    /// Minimum time between watch updates
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Minimum movement between watch updates
    #[serde(default = "default_min_distance_m")]
    pub min_distance_m: f64,

    /// Fixed latitude used when the host has no positioning hardware
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Fixed longitude used when the host has no positioning hardware
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
            min_distance_m: default_min_distance_m(),
            latitude: None,
            longitude: None,
        }
    }
}

fn default_min_interval_ms() -> u64 {
    5000
}

fn default_min_distance_m() -> f64 {
    10.0
}

/// OpenStreetMap Overpass source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverpassConfig {
    /// Interpreter endpoint
    #[serde(default = "default_overpass_endpoint")]
    pub endpoint: String,

    /// Search radius around the origin
    #[serde(default = "default_overpass_radius_m")]
    pub radius_m: u32,

    /// Server-side query timeout
    #[serde(default = "default_overpass_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: default_overpass_endpoint(),
            radius_m: default_overpass_radius_m(),
            timeout_secs: default_overpass_timeout_secs(),
        }
    }
}

fn default_overpass_endpoint() -> String {
    "https://overpass.kumi.systems/api/interpreter".to_string()
}

fn default_overpass_radius_m() -> u32 {
    15_000
}

fn default_overpass_timeout_secs() -> u64 {
    25
}

/// Local favorites storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoritesConfig {
    /// Key-value store file; `~` is expanded
    #[serde(default = "default_favorites_path")]
    pub path: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            path: default_favorites_path(),
        }
    }
}

impl FavoritesConfig {
    /// Store path with `~` and environment variables expanded
    pub fn resolved_path(&self) -> Result<PathBuf> {
        shellexpand::full(&self.path)
            .map(|p| PathBuf::from(p.into_owned()))
            .map_err(|e| Error::invalid_config("favorites.path", e))
    }
}

fn default_favorites_path() -> String {
    "~/.sportspot/store.json".to_string()
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
