//! Query API server for the sighting-report dataset.
//!
//! This crate provides an Axum HTTP server that exposes the tabular
//! query endpoints (by identifier, state, county, year range, keyword)
//! plus a geospatial radius search backed by an external geocoding
//! provider.
//!
//! # Architecture
//!
//! The server reads from an immutable in-memory [`Dataset`] loaded at
//! startup; the offline scraper refreshes the backing file between
//! process restarts. The only external call at request time is the
//! geocoding round-trip on the radius path, behind the enum-dispatch
//! [`Geocoder`] port so tests run against a fixed lookup table.
//!
//! [`Dataset`]: bigfoot_data::Dataset
//! [`Geocoder`]: bigfoot_geocode::Geocoder

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use bigfoot_geocode::{FixedGeocoder, Geocoder, GoogleGeocoder};
pub use config::AppConfig;
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
