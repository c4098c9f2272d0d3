//! Shared application state for the query API server.
//!
//! [`AppState`] holds the immutable dataset and the geocoding backend.
//! The dataset is loaded once at startup and shared read-only across
//! all requests; no lock is needed because no handler mutates it. The
//! radius endpoint's `distance_km` column is computed into per-request
//! vectors, never written into this shared state.

use std::sync::Arc;

use bigfoot_data::Dataset;
use bigfoot_geocode::Geocoder;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The immutable sighting dataset.
    pub dataset: Arc<Dataset>,
    /// Geocoding backend used by the nearby-sightings endpoint.
    pub geocoder: Geocoder,
    /// Radius applied when a nearby-sightings request omits `radius`.
    pub default_radius_km: f64,
}

impl AppState {
    /// Create application state from a loaded dataset and geocoder.
    pub fn new(dataset: Dataset, geocoder: Geocoder, default_radius_km: f64) -> Self {
        Self {
            dataset: Arc::new(dataset),
            geocoder,
            default_radius_km,
        }
    }
}
