//! HTTP collaborators for sportspot
//!
//! A resilient client for the Supabase REST API and the Overpass interpreter,
//! plus the place repositories and review store built on it.
//!
//! # Features
//!
//! - **Environment-based configuration**: URLs and keys from environment variables
//! - **Retry with exponential backoff**: automatic retry for transient failures
//! - **Circuit breaker**: stop hammering a backend that is down
//! - **Request correlation**: every request carries an `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use sportspot_api_client::SportspotClient;
//! use sportspot_places::PlaceRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SportspotClient::new()?;
//!     let places = client.places().get_all().await?;
//!     println!("{} places", places.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::SportspotClient;
pub use config::{ClientConfig, Environment};
pub use endpoints::{OverpassPlaces, OverpassQuery, SupabasePlaces, SupabaseReviews};
pub use error::{ApiError, ApiResult};
