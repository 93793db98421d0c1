use super::state::{RefreshOutcome, SessionOptions, SessionState, SessionStatus};
use crate::error::{PlaceError, Result};
use crate::filter::FilterParams;
use crate::place::{Place, RankedPlace};
use crate::source::{LocationSource, Permission, PlaceRepository, WatchOptions, WatchSubscription};
use sportspot_geo::Coordinate;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, instrument};

/// Drives a [`SessionState`] from a location source and a place repository.
///
/// Cheap to clone; clones share state. The lock is never held across an
/// await, so refreshes may overlap freely and the stale-result rule decides
/// which one lands.
pub struct Session<L, R> {
    state: Arc<Mutex<SessionState>>,
    location: Arc<L>,
    repository: Arc<R>,
}

impl<L, R> Clone for Session<L, R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            location: Arc::clone(&self.location),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<L, R> Session<L, R>
where
    L: LocationSource + 'static,
    R: PlaceRepository + 'static,
{
    /// New session with default options
    pub fn new(location: L, repository: R) -> Self {
        Self::with_options(location, repository, SessionOptions::default())
    }

    /// New session with explicit options
    pub fn with_options(location: L, repository: R, options: SessionOptions) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new(options))),
            location: Arc::new(location),
            repository: Arc::new(repository),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // Every mutation completes inside one call, so a poisoned lock still
        // guards a consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch location and places concurrently and publish the result.
    ///
    /// Failures do not propagate; they are recorded in the returned status
    /// and the last known data is kept.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> SessionStatus {
        let ticket = self.lock().begin_refresh();
        let seq = ticket.seq();

        let (location, places) = tokio::join!(self.resolve_location(), self.repository.get_all());

        let mut state = self.lock();
        if state.complete_refresh(ticket, RefreshOutcome { location, places }) {
            info!(seq, visible = state.view().len(), "refresh applied");
        }
        state.status()
    }

    async fn resolve_location(&self) -> Result<Coordinate> {
        match self.location.request_permission().await? {
            Permission::Granted => self.location.current_coordinate().await,
            Permission::Denied => Err(PlaceError::PermissionDenied),
        }
    }

    /// Follow the device position; each delivered fix replaces the origin.
    pub async fn watch_location(&self, options: WatchOptions) -> Result<WatchSubscription> {
        if self.location.request_permission().await? == Permission::Denied {
            return Err(PlaceError::PermissionDenied);
        }
        let state = Arc::clone(&self.state);
        self.location.watch_coordinate(
            options,
            Box::new(move |coordinate| {
                state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .set_origin(Some(coordinate));
            }),
        )
    }

    /// Look up one place in the repository.
    pub async fn place(&self, id: &str) -> Result<Place> {
        self.repository.get_by_id(id).await
    }

    /// Snapshot of the current view
    pub fn view(&self) -> Vec<RankedPlace> {
        self.lock().view().to_vec()
    }

    /// Current status
    pub fn status(&self) -> SessionStatus {
        self.lock().status()
    }

    /// Current origin
    pub fn origin(&self) -> Option<Coordinate> {
        self.lock().origin()
    }

    /// Current filter parameters
    pub fn params(&self) -> FilterParams {
        self.lock().params().clone()
    }

    /// See [`SessionState::suggestions`]
    pub fn suggestions(&self, query: &str) -> Vec<RankedPlace> {
        self.lock().suggestions(query)
    }

    /// See [`SessionState::set_origin`]
    pub fn set_origin(&self, origin: Option<Coordinate>) {
        self.lock().set_origin(origin);
    }

    /// See [`SessionState::set_places`]
    pub fn set_places(&self, places: Vec<Place>) {
        self.lock().set_places(places);
    }

    /// See [`SessionState::set_filter_params`]
    pub fn set_filter_params(&self, params: FilterParams) {
        self.lock().set_filter_params(params);
    }

    /// See [`SessionState::set_search_text`]
    pub fn set_search_text(&self, text: impl Into<String>) {
        self.lock().set_search_text(text);
    }

    /// Flip the nearby radius; returns whether it is now on.
    pub fn toggle_nearby(&self) -> bool {
        let mut state = self.lock();
        state.toggle_nearby();
        state.is_nearby()
    }

    /// Whether the nearby radius is on
    pub fn is_nearby(&self) -> bool {
        self.lock().is_nearby()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaceErrorCode;
    use crate::session::SessionPhase;
    use crate::source::{MemoryPlaceRepository, StaticLocationSource};

    fn places() -> Vec<Place> {
        vec![
            Place::new("1", "Central Gym", "gym", Coordinate::new(13.75, 100.50)),
            Place::new("2", "North Park", "park", Coordinate::new(13.80, 100.50)),
        ]
    }

    #[tokio::test]
    async fn test_refresh_ranks_by_distance() {
        let session = Session::new(
            StaticLocationSource::new(Coordinate::new(13.80, 100.50)),
            MemoryPlaceRepository::new(places()),
        );
        let status = session.refresh().await;
        assert_eq!(status.phase, SessionPhase::Ready);
        assert!(status.error.is_none());

        let ids: Vec<_> = session.view().iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[tokio::test]
    async fn test_denied_permission_keeps_places_unranked() {
        let session =
            Session::new(StaticLocationSource::denied(), MemoryPlaceRepository::new(places()));
        let status = session.refresh().await;

        assert_eq!(status.error.map(|e| e.code), Some(PlaceErrorCode::PermissionDenied));
        assert_eq!(session.view().len(), 2);
        assert!(session.view().iter().all(|p| p.distance_km.is_none()));

        assert!(session.toggle_nearby());
        assert!(session.view().is_empty());
    }

    #[tokio::test]
    async fn test_watch_location_updates_origin() {
        let session = Session::new(
            StaticLocationSource::new(Coordinate::new(13.75, 100.50)),
            MemoryPlaceRepository::new(places()),
        );
        session.set_places(places());
        let _sub = session.watch_location(WatchOptions::default()).await.unwrap();
        assert_eq!(session.origin(), Some(Coordinate::new(13.75, 100.50)));
        assert_eq!(session.view()[0].id(), "1");
    }

    #[tokio::test]
    async fn test_watch_location_denied() {
        let session =
            Session::new(StaticLocationSource::denied(), MemoryPlaceRepository::default());
        let err = session.watch_location(WatchOptions::default()).await.unwrap_err();
        assert_eq!(err, PlaceError::PermissionDenied);
    }

    #[tokio::test]
    async fn test_place_not_found() {
        let session =
            Session::new(StaticLocationSource::denied(), MemoryPlaceRepository::new(places()));
        assert_eq!(session.place("2").await.unwrap().name, "North Park");
        assert!(matches!(session.place("9").await, Err(PlaceError::NotFound(_))));
    }
}
