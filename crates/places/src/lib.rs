//! Place ranking and incremental filtering for sportspot.
//!
//! This crate provides:
//! - [`rank`]: attach a distance from an optional origin and sort closest first
//! - [`apply`]: text → radius → top-N filtering over a ranked list
//! - [`SessionState`] / [`Session`]: the origin, place set and filter inputs,
//!   with a derived view recomputed eagerly whenever one of them changes
//! - Collaborator contracts for location, place data, favorites and reviews
//!
//! # Example
//!
//! ```
//! use sportspot_places::{FilterParams, Place, SessionState};
//! use sportspot_geo::Coordinate;
//!
//! let mut state = SessionState::default();
//! state.set_places(vec![
//!     Place::new("1", "Central Gym", "gym", Coordinate::new(13.75, 100.50)),
//!     Place::new("2", "North Park", "park", Coordinate::new(13.80, 100.50)),
//! ]);
//! state.set_origin(Some(Coordinate::new(13.75, 100.50)));
//! state.set_filter_params(FilterParams::new().with_radius_km(1.0));
//!
//! let ids: Vec<_> = state.view().iter().map(|p| p.id()).collect();
//! assert_eq!(ids, ["1"]);
//! ```

mod display;
mod error;
mod favorites;
mod filter;
mod place;
mod rank;
mod review;
mod session;
mod source;

pub use display::{format_distance, maps_url};
pub use error::{ErrorDescriptor, PlaceError, PlaceErrorCode, Result};
pub use favorites::{
    FavoritesStore, FileStore, JsonFavoritesStore, KeyValueStore, MemoryStore, FAVORITES_KEY,
};
pub use filter::{apply, FilterParams};
pub use place::{FavoriteEntry, Place, RankedPlace};
pub use rank::rank;
pub use review::{validate_review, Review, ReviewStore, MAX_RATING, MIN_RATING};
pub use session::{
    RefreshOutcome, RefreshTicket, Session, SessionOptions, SessionPhase, SessionState,
    SessionStatus,
};
pub use source::{
    CoordinateCallback, LocationSource, MemoryPlaceRepository, Permission, PlaceRepository,
    StaticLocationSource, WatchOptions, WatchSubscription,
};

pub use sportspot_geo::Coordinate;
