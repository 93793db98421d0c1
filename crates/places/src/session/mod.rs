//! Session: the three inputs (origin, places, filter) and the derived view.
//!
//! [`SessionState`] is the synchronous core; [`Session`] drives it from a
//! location source and a place repository.

mod controller;
mod state;

pub use controller::Session;
pub use state::{
    RefreshOutcome, RefreshTicket, SessionOptions, SessionPhase, SessionState, SessionStatus,
};
