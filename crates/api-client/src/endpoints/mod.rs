//! Typed interfaces over the backends
//!
//! | Module | Backend | Implements |
//! |--------|---------|------------|
//! | `places` | Supabase `places` table | `PlaceRepository` |
//! | `reviews` | Supabase `reviews` table | `ReviewStore` |
//! | `overpass` | Overpass interpreter | `PlaceRepository` |

pub mod overpass;
pub mod places;
pub mod reviews;

pub use overpass::{OverpassPlaces, OverpassQuery};
pub use places::SupabasePlaces;
pub use reviews::SupabaseReviews;

use serde_json::Value;

/// Reads an identifier that may arrive as a string or a number.
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads an optional non-empty text column.
pub(crate) fn text(row: &Value, key: &str) -> Option<String> {
    row.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
