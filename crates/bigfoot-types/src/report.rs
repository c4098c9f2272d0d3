//! The sighting-report record and its radius-query projection.

use serde::{Deserialize, Serialize};

/// One geocoded sighting report from the dataset.
///
/// Source data stores `county` with a trailing `" County"` suffix and
/// `state` as a full state name. `observed` is the free-text witness
/// description and may be absent for sparse reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightingReport {
    /// Unique report identifier assigned by the source database.
    pub report_number: u64,
    /// Free-text description of what the witness observed.
    pub observed: Option<String>,
    /// County name, always carrying the `" County"` suffix.
    pub county: String,
    /// Full state name (e.g. `"Washington"`).
    pub state: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Year of the sighting.
    pub year: i32,
}

/// A sighting report paired with its distance from a query center.
///
/// Produced per radius query; the `distance_km` column exists only in
/// the response for that request and is never written back to the
/// shared dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedReport {
    /// The matched report.
    #[serde(flatten)]
    pub report: SightingReport,
    /// Great-circle distance from the query center in kilometers.
    pub distance_km: f64,
}
