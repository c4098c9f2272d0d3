//! Shared type definitions for the Bigfoot Atlas services.
//!
//! This crate is the single source of truth for the record types shared
//! between the query API and the offline scraper. The dataset file on
//! disk is a JSON array of [`SightingReport`] objects; everything the
//! HTTP layer returns is either a report or a [`LocatedReport`]
//! projection of one.
//!
//! # Modules
//!
//! - [`report`] -- The sighting-report record and its radius-query projection
//! - [`coordinates`] -- Geographic coordinate pair returned by geocoding

pub mod coordinates;
pub mod report;

// Re-export all public types at crate root for convenience.
pub use coordinates::Coordinates;
pub use report::{LocatedReport, SightingReport};
