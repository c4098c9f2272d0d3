//! In-memory sighting dataset store.
//!
//! Loads the JSON dataset produced by the offline scraper, validates the
//! required column set at startup, and exposes read-only filtering
//! operations over the records. The dataset never changes during the
//! serving process's lifetime; a refresh means restarting after the
//! scraper has rewritten the backing file.
//!
//! # Modules
//!
//! - [`dataset`] -- Load, validation, and the per-endpoint query helpers
//! - [`error`] -- Load-time error taxonomy
//! - [`geo`] -- Haversine great-circle distance
//! - [`normalize`] -- Case folding and county-name normalization rules

pub mod dataset;
pub mod error;
pub mod geo;
pub mod normalize;

pub use dataset::{Dataset, REQUIRED_COLUMNS};
pub use error::DatasetError;
pub use geo::distance_km;
