//! Core utilities shared by the sportspot crates
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Retry**: exponential backoff policy and a circuit breaker for remote calls
//! - **Configuration**: TOML configuration with per-field defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use sportspot_core::config::Config;
//!
//! let config = Config::load(None).expect("config");
//! println!("nearby radius: {} km", config.schema.search.nearby_radius_km);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};
