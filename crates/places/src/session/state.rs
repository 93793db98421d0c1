use crate::error::{ErrorDescriptor, PlaceErrorCode, Result};
use crate::filter::{apply, matches_text, FilterParams};
use crate::place::{Place, RankedPlace};
use crate::rank::rank;
use serde::Serialize;
use sportspot_geo::Coordinate;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tunables that are not part of the per-recompute snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Radius used by [`SessionState::toggle_nearby`]
    pub nearby_radius_km: f64,
    /// Maximum entries returned by [`SessionState::suggestions`]
    pub suggestion_limit: usize,
    /// Filter in effect before the first `set_filter_params`
    pub initial_params: FilterParams,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            nearby_radius_km: 5.0,
            suggestion_limit: 5,
            initial_params: FilterParams::default(),
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Nothing loaded, nothing requested
    Uninitialized,
    /// A location request is outstanding; places may already be loaded
    LocationPending,
    /// A view has been computed; it may be stale relative to a refresh in flight
    Ready,
}

/// What the presentation layer shows next to the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    /// Lifecycle phase
    pub phase: SessionPhase,
    /// A refresh is in flight
    pub refreshing: bool,
    /// Last refresh failure, if not yet superseded
    pub error: Option<ErrorDescriptor>,
}

/// Sequence number handed out when a refresh starts.
///
/// Not `Clone`: each ticket completes at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    seq: u64,
}

impl RefreshTicket {
    /// Position of this refresh in the session's sequence
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Results of the two fetches a refresh performs.
#[derive(Debug)]
pub struct RefreshOutcome {
    /// Permission + fix result
    pub location: Result<Coordinate>,
    /// Repository result
    pub places: Result<Vec<Place>>,
}

/// Holds origin, places and filter parameters and keeps the derived view
/// current.
///
/// Every mutation recomputes eagerly inside one `&mut self` call, so reads
/// are O(1) and never observe a mix of old and new inputs. Writes are
/// stamped from one monotonically increasing clock: a refresh result is
/// dropped entirely if a newer refresh has started, and per slot if that slot
/// was written directly after the refresh began.
#[derive(Debug)]
pub struct SessionState {
    options: SessionOptions,

    places: Vec<Arc<Place>>,
    origin: Option<Coordinate>,
    params: FilterParams,

    ranked: Vec<RankedPlace>,
    view: Vec<RankedPlace>,

    phase: SessionPhase,
    error: Option<ErrorDescriptor>,

    clock: u64,
    latest_refresh: Option<u64>,
    refresh_pending: bool,
    origin_stamp: u64,
    places_stamp: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl SessionState {
    /// Empty session
    pub fn new(options: SessionOptions) -> Self {
        let params = options.initial_params.clone();
        Self {
            options,
            places: Vec::new(),
            origin: None,
            params,
            ranked: Vec::new(),
            view: Vec::new(),
            phase: SessionPhase::Uninitialized,
            error: None,
            clock: 0,
            latest_refresh: None,
            refresh_pending: false,
            origin_stamp: 0,
            places_stamp: 0,
        }
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    /// Current derived view: ranked, then filtered
    pub fn view(&self) -> &[RankedPlace] {
        &self.view
    }

    /// Status descriptor
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            phase: self.phase,
            refreshing: self.refresh_pending,
            error: self.error.clone(),
        }
    }

    /// Current origin
    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    /// Current raw place set, in repository order
    pub fn places(&self) -> &[Arc<Place>] {
        &self.places
    }

    /// Current filter parameters
    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Whether the nearby radius is active
    pub fn is_nearby(&self) -> bool {
        self.params.radius_km.is_some()
    }

    /// Closest places whose name or category contains `query`, ignoring the
    /// radius and limit of the current filter. Blank query → no suggestions.
    pub fn suggestions(&self, query: &str) -> Vec<RankedPlace> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.ranked
            .iter()
            .filter(|p| matches_text(p, &needle))
            .take(self.options.suggestion_limit)
            .cloned()
            .collect()
    }

    // ---------------------------------------------------------------------
    // Direct writes
    // ---------------------------------------------------------------------

    /// Replace the origin. `None` means no fix is available.
    pub fn set_origin(&mut self, origin: Option<Coordinate>) {
        self.origin_stamp = self.tick();
        self.origin = origin;
        if origin.is_some() {
            self.clear_error_if(|code| {
                matches!(
                    code,
                    PlaceErrorCode::PermissionDenied | PlaceErrorCode::LocationUnavailable
                )
            });
        }
        self.phase = SessionPhase::Ready;
        self.rerank();
    }

    /// Replace the raw place set.
    pub fn set_places(&mut self, places: Vec<Place>) {
        self.places_stamp = self.tick();
        self.places = places.into_iter().map(Arc::new).collect();
        self.clear_error_if(|code| code == PlaceErrorCode::Repository);
        self.mark_computed();
        self.rerank();
    }

    /// Replace the filter parameters.
    pub fn set_filter_params(&mut self, params: FilterParams) {
        self.params = params;
        self.mark_computed();
        self.refilter();
    }

    /// Replace only the search text.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.params.search_text = text.into();
        self.mark_computed();
        self.refilter();
    }

    /// Flip the nearby-only radius on or off.
    pub fn toggle_nearby(&mut self) {
        self.params.radius_km = match self.params.radius_km {
            Some(_) => None,
            None => Some(self.options.nearby_radius_km),
        };
        self.mark_computed();
        self.refilter();
    }

    // ---------------------------------------------------------------------
    // Refresh protocol
    // ---------------------------------------------------------------------

    /// Start a refresh. Any refresh started earlier becomes stale.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        let seq = self.tick();
        self.latest_refresh = Some(seq);
        self.refresh_pending = true;
        if self.phase == SessionPhase::Uninitialized {
            self.phase = SessionPhase::LocationPending;
        }
        debug!(seq, "refresh started");
        RefreshTicket { seq }
    }

    /// Apply the results of a refresh. Returns `false` when the results were
    /// discarded because a newer refresh has started.
    ///
    /// A failed location keeps the last known origin; a failed fetch keeps
    /// the last known places. Either failure is recorded in the status, the
    /// repository one taking precedence when both fail.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, outcome: RefreshOutcome) -> bool {
        if self.latest_refresh.is_some_and(|latest| ticket.seq < latest) {
            debug!(seq = ticket.seq, latest = ?self.latest_refresh, "discarding stale refresh");
            return false;
        }

        self.refresh_pending = false;
        self.error = None;

        match outcome.location {
            Ok(coordinate) if ticket.seq > self.origin_stamp => {
                self.origin = Some(coordinate);
                self.origin_stamp = ticket.seq;
            }
            Ok(_) => debug!(seq = ticket.seq, "origin written after refresh began, keeping it"),
            Err(e) => {
                warn!(error = %e, "location unavailable, keeping last known origin");
                self.error = Some(e.descriptor());
            }
        }

        match outcome.places {
            Ok(places) if ticket.seq > self.places_stamp => {
                self.places = places.into_iter().map(Arc::new).collect();
                self.places_stamp = ticket.seq;
            }
            Ok(_) => debug!(seq = ticket.seq, "places written after refresh began, keeping them"),
            Err(e) => {
                warn!(error = %e, "place fetch failed, keeping last known places");
                self.error = Some(e.descriptor());
            }
        }

        self.phase = SessionPhase::Ready;
        self.rerank();
        true
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn mark_computed(&mut self) {
        if self.phase == SessionPhase::Uninitialized {
            self.phase = SessionPhase::Ready;
        }
    }

    fn clear_error_if(&mut self, pred: impl Fn(PlaceErrorCode) -> bool) {
        if self.error.as_ref().is_some_and(|e| pred(e.code)) {
            self.error = None;
        }
    }

    fn rerank(&mut self) {
        self.ranked = rank(&self.places, self.origin);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.view = apply(self.ranked.clone(), &self.params);
        debug!(
            places = self.places.len(),
            visible = self.view.len(),
            has_origin = self.origin.is_some(),
            "view recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaceError;

    const ORIGIN: Coordinate = Coordinate::new(13.75, 100.50);

    fn scenario() -> Vec<Place> {
        vec![
            Place::new("1", "Central Gym", "gym", Coordinate::new(13.75, 100.50)),
            Place::new("2", "North Park", "park", Coordinate::new(13.80, 100.50)),
        ]
    }

    fn ids(state: &SessionState) -> Vec<String> {
        state.view().iter().map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn test_starts_uninitialized() {
        let state = SessionState::default();
        assert_eq!(state.status().phase, SessionPhase::Uninitialized);
        assert!(state.view().is_empty());
    }

    #[test]
    fn test_inputs_in_any_order_give_same_view() {
        let params = FilterParams::new().with_radius_km(1.0);

        let mut a = SessionState::default();
        a.set_places(scenario());
        a.set_origin(Some(ORIGIN));
        a.set_filter_params(params.clone());

        let mut b = SessionState::default();
        b.set_filter_params(params);
        b.set_origin(Some(ORIGIN));
        b.set_places(scenario());

        assert_eq!(a.view(), b.view());
        assert_eq!(ids(&a), ["1"]);
    }

    #[test]
    fn test_refresh_enters_location_pending() {
        let mut state = SessionState::default();
        let ticket = state.begin_refresh();
        assert_eq!(state.status().phase, SessionPhase::LocationPending);
        assert!(state.status().refreshing);

        state.set_places(scenario());
        assert_eq!(state.status().phase, SessionPhase::LocationPending);
        assert_eq!(ids(&state), ["1", "2"]);

        assert!(state.complete_refresh(
            ticket,
            RefreshOutcome {
                location: Ok(Coordinate::new(13.80, 100.50)),
                places: Ok(scenario()),
            }
        ));
        let status = state.status();
        assert_eq!(status.phase, SessionPhase::Ready);
        assert!(!status.refreshing);
        assert_eq!(ids(&state), ["2", "1"]);
    }

    #[test]
    fn test_places_set_after_refresh_start_win() {
        let mut state = SessionState::default();
        let ticket = state.begin_refresh();
        state.set_places(vec![scenario().remove(1)]);

        state.complete_refresh(
            ticket,
            RefreshOutcome {
                location: Ok(ORIGIN),
                places: Ok(scenario()),
            },
        );
        assert_eq!(ids(&state), ["2"]);
        assert_eq!(state.origin(), Some(ORIGIN));
    }

    #[test]
    fn test_refresh_does_not_regress_ready() {
        let mut state = SessionState::default();
        state.set_origin(Some(ORIGIN));
        let _ticket = state.begin_refresh();
        assert_eq!(state.status().phase, SessionPhase::Ready);
        assert!(state.status().refreshing);
    }

    #[test]
    fn test_toggle_nearby() {
        let mut state = SessionState::new(SessionOptions {
            nearby_radius_km: 1.0,
            ..SessionOptions::default()
        });
        state.set_places(scenario());
        state.set_origin(Some(ORIGIN));

        state.toggle_nearby();
        assert!(state.is_nearby());
        assert_eq!(ids(&state), ["1"]);

        state.toggle_nearby();
        assert!(!state.is_nearby());
        assert_eq!(ids(&state), ["1", "2"]);
    }

    #[test]
    fn test_suggestions_ignore_radius_and_cap() {
        let mut state = SessionState::new(SessionOptions {
            suggestion_limit: 1,
            ..SessionOptions::default()
        });
        let mut places = scenario();
        places.push(Place::new("3", "Park Arena", "stadium", Coordinate::new(13.76, 100.50)));
        state.set_places(places);
        state.set_origin(Some(ORIGIN));
        state.set_filter_params(FilterParams::new().with_radius_km(0.1));

        let suggestions = state.suggestions("PARK");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].id(), "3");
        assert!(state.suggestions("  ").is_empty());
    }

    #[test]
    fn test_origin_clears_location_error() {
        let mut state = SessionState::default();
        let ticket = state.begin_refresh();
        state.complete_refresh(
            ticket,
            RefreshOutcome {
                location: Err(PlaceError::PermissionDenied),
                places: Ok(scenario()),
            },
        );
        assert_eq!(
            state.status().error.map(|e| e.code),
            Some(PlaceErrorCode::PermissionDenied)
        );

        state.set_origin(Some(ORIGIN));
        assert!(state.status().error.is_none());
    }
}
