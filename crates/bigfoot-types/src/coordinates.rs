//! Geographic coordinate pair in decimal degrees.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// This is the shape a geocoding provider resolves a free-text location
/// into, and the center point of a radius search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees (positive north).
    pub lat: f64,
    /// Longitude in decimal degrees (positive east).
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair from latitude and longitude degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
