//! Collaborator contracts for position and place data.
//!
//! Platform location services and remote backends sit behind these traits so
//! the session can run against fakes in tests and fixed inputs in the CLI.

use crate::error::{PlaceError, Result};
use crate::place::Place;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sportspot_geo::Coordinate;
use std::fmt;

/// Outcome of a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Location may be read
    Granted,
    /// Location may not be read
    Denied,
}

/// Throttling hints for a position watch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchOptions {
    /// Minimum time between deliveries
    pub min_interval_ms: u64,
    /// Minimum movement between deliveries
    pub min_distance_m: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            min_interval_ms: 5000,
            min_distance_m: 10.0,
        }
    }
}

/// Receives each coordinate delivered by a watch.
pub type CoordinateCallback = Box<dyn Fn(Coordinate) + Send + Sync>;

/// Handle for an active position watch. Delivery stops when the handle is
/// disposed or dropped.
pub struct WatchSubscription {
    disposer: Option<Box<dyn FnOnce() + Send>>,
}

impl WatchSubscription {
    /// Wrap the source-specific teardown.
    pub fn new(disposer: impl FnOnce() + Send + 'static) -> Self {
        Self {
            disposer: Some(Box::new(disposer)),
        }
    }

    /// A handle with nothing to tear down.
    pub fn noop() -> Self {
        Self { disposer: None }
    }

    /// Stop delivery now.
    pub fn dispose(mut self) {
        self.run_disposer();
    }

    fn run_disposer(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl Drop for WatchSubscription {
    fn drop(&mut self) {
        self.run_disposer();
    }
}

impl fmt::Debug for WatchSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSubscription")
            .field("active", &self.disposer.is_some())
            .finish()
    }
}

/// Device position provider.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Ask for (or report) location permission.
    async fn request_permission(&self) -> Result<Permission>;

    /// One-shot fix. Fails with [`PlaceError::LocationUnavailable`] when no
    /// fix can be obtained.
    async fn current_coordinate(&self) -> Result<Coordinate>;

    /// Start delivering coordinates to `callback` until the returned handle
    /// is disposed.
    fn watch_coordinate(
        &self,
        options: WatchOptions,
        callback: CoordinateCallback,
    ) -> Result<WatchSubscription>;
}

/// Place data provider.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Every place the source knows about, in source order.
    async fn get_all(&self) -> Result<Vec<Place>>;

    /// One place. Fails with [`PlaceError::NotFound`] when absent.
    async fn get_by_id(&self, id: &str) -> Result<Place>;
}

/// Location source with a fixed answer, for hosts without positioning.
///
/// `None` behaves like a user who declined the permission prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocationSource {
    coordinate: Option<Coordinate>,
}

impl StaticLocationSource {
    /// Always report `coordinate`.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
        }
    }

    /// Always deny permission.
    pub fn denied() -> Self {
        Self { coordinate: None }
    }
}

#[async_trait]
impl LocationSource for StaticLocationSource {
    async fn request_permission(&self) -> Result<Permission> {
        Ok(if self.coordinate.is_some() {
            Permission::Granted
        } else {
            Permission::Denied
        })
    }

    async fn current_coordinate(&self) -> Result<Coordinate> {
        self.coordinate
            .ok_or_else(|| PlaceError::LocationUnavailable("no fixed position configured".into()))
    }

    fn watch_coordinate(
        &self,
        _options: WatchOptions,
        callback: CoordinateCallback,
    ) -> Result<WatchSubscription> {
        let coordinate = self.coordinate.ok_or(PlaceError::PermissionDenied)?;
        callback(coordinate);
        Ok(WatchSubscription::noop())
    }
}

/// Place source over an in-memory list, e.g. loaded from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlaceRepository {
    places: Vec<Place>,
}

impl MemoryPlaceRepository {
    /// Serve `places` in the given order.
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// Parse a JSON array of places.
    pub fn from_json(json: &str) -> Result<Self> {
        let places: Vec<Place> =
            serde_json::from_str(json).map_err(|e| PlaceError::Repository(e.to_string()))?;
        Ok(Self::new(places))
    }
}

#[async_trait]
impl PlaceRepository for MemoryPlaceRepository {
    async fn get_all(&self) -> Result<Vec<Place>> {
        Ok(self.places.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Place> {
        self.places
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PlaceError::NotFound(id.to_string()))
    }
}
