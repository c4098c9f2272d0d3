//! Geocoding provider port shared by the query API and the scraper.
//!
//! Defines an enum-based dispatch for geocoding backends, avoiding the
//! dyn-compatibility issues with async trait methods. The concrete
//! implementation talks to the Google Maps Geocoding API over
//! `reqwest`; a fixed-table backend exists so callers can be exercised
//! without network access.
//!
//! Callers do not care which provider is behind the call -- they send
//! a free-text location and expect zero or one coordinate pair back.

use std::time::Duration;

use bigfoot_types::Coordinates;
use serde::Deserialize;

/// Geocoding provider configuration.
///
/// Embedded in both the query API config and the scraper config; the
/// `GOOGLE_MAPS_API_KEY` environment override is applied by whichever
/// binary loads it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeocoderConfig {
    /// Backend name: `google` or `fixed`.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Geocoding endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Provider API key (usually injected via `GOOGLE_MAPS_API_KEY`).
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            api_url: default_api_url(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_backend() -> String {
    "google".to_owned()
}

fn default_api_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_owned()
}

const fn default_timeout_ms() -> u64 {
    5_000
}

/// Errors that can occur while resolving a location to coordinates.
///
/// A provider that answers "no such place" is *not* an error; that is
/// the `Ok(None)` case of [`Geocoder::geocode`].
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The request exceeded the configured time bound.
    #[error("geocoding request timed out")]
    Timeout,

    /// The request could not be sent or the connection failed.
    #[error("geocoding request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status of its own.
    #[error("geocoding provider returned {status}: {detail}")]
    Provider {
        /// Provider status string (e.g. `REQUEST_DENIED`).
        status: String,
        /// Provider-supplied detail message, possibly empty.
        detail: String,
    },

    /// The response body could not be interpreted.
    #[error("geocoding response malformed: {0}")]
    Malformed(String),

    /// The configured backend name is not recognized.
    #[error("unknown geocoder backend: {0}")]
    UnknownBackend(String),
}

// ---------------------------------------------------------------------------
// Unified backend enum (dyn-compatible alternative to async trait)
// ---------------------------------------------------------------------------

/// A geocoding backend that resolves free text to coordinates.
///
/// Uses enum dispatch instead of trait objects because async methods
/// are not dyn-compatible in Rust.
#[derive(Debug, Clone)]
pub enum Geocoder {
    /// Google Maps Geocoding API.
    Google(GoogleGeocoder),
    /// Fixed lookup table for tests and offline development.
    Fixed(FixedGeocoder),
}

impl Geocoder {
    /// Build a backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::UnknownBackend`] for an unrecognized
    /// backend name, or [`GeocodeError::Transport`] if the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        match config.backend.as_str() {
            "google" => Ok(Self::Google(GoogleGeocoder::new(config)?)),
            "fixed" => Ok(Self::Fixed(FixedGeocoder::default())),
            other => Err(GeocodeError::UnknownBackend(other.to_owned())),
        }
    }

    /// Resolve a free-text location to zero or one coordinate pair.
    ///
    /// `Ok(None)` means the provider found no matching place.
    ///
    /// # Errors
    ///
    /// Returns a [`GeocodeError`] when the provider cannot be reached,
    /// times out, or answers with something uninterpretable.
    pub async fn geocode(&self, location: &str) -> Result<Option<Coordinates>, GeocodeError> {
        match self {
            Self::Google(backend) => backend.geocode(location).await,
            Self::Fixed(backend) => backend.geocode(location),
        }
    }

    /// Human-readable backend name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Google(_) => "google",
            Self::Fixed(_) => "fixed",
        }
    }
}

// ---------------------------------------------------------------------------
// Google Maps Geocoding API backend
// ---------------------------------------------------------------------------

/// Backend for the Google Maps Geocoding API.
///
/// Sends `GET {api_url}?address=...&key=...` and reads
/// `results[0].geometry.location`. The provider's own `status` field
/// distinguishes "no results" from request-level failures.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    /// Create a new Google geocoding backend.
    ///
    /// The request timeout is applied at the client so every geocoding
    /// round-trip is time-bounded.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Transport`] if the HTTP client cannot
    /// be constructed.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GeocodeError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Resolve a location via the remote API.
    async fn geocode(&self, location: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("address", location), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodeError::Timeout
                } else {
                    GeocodeError::Transport(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(GeocodeError::Provider {
                status: status.to_string(),
                detail,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GeocodeError::Malformed(format!("response parse failed: {e}")))?;

        extract_coordinates(&json)
    }
}

/// Extract the first result's coordinates from a geocoding response.
///
/// `ZERO_RESULTS` (and an `OK` answer with an empty result list) maps
/// to `Ok(None)`; any other non-`OK` provider status is surfaced as
/// [`GeocodeError::Provider`].
fn extract_coordinates(
    json: &serde_json::Value,
) -> Result<Option<Coordinates>, GeocodeError> {
    let status = json
        .get("status")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("MISSING");

    match status {
        "ZERO_RESULTS" => Ok(None),
        "OK" => {
            let location = json
                .get("results")
                .and_then(|r| r.get(0))
                .and_then(|r| r.get("geometry"))
                .and_then(|g| g.get("location"));
            let lat = location
                .and_then(|l| l.get("lat"))
                .and_then(serde_json::Value::as_f64);
            let lng = location
                .and_then(|l| l.get("lng"))
                .and_then(serde_json::Value::as_f64);
            match (lat, lng) {
                (Some(lat), Some(lng)) => Ok(Some(Coordinates::new(lat, lng))),
                _ if json
                    .get("results")
                    .and_then(serde_json::Value::as_array)
                    .is_some_and(Vec::is_empty) =>
                {
                    Ok(None)
                }
                _ => Err(GeocodeError::Malformed(
                    "response missing results[0].geometry.location".to_owned(),
                )),
            }
        }
        other => Err(GeocodeError::Provider {
            status: other.to_owned(),
            detail: json
                .get("error_message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_owned(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Fixed lookup backend
// ---------------------------------------------------------------------------

/// Geocoding backend answering from a fixed table.
///
/// Lookups fold case; a location absent from the table resolves to
/// `Ok(None)`, the same shape the real provider produces for an
/// unknown place. Used by the API tests and the `fixed` config
/// backend for offline development.
#[derive(Debug, Clone, Default)]
pub struct FixedGeocoder {
    places: Vec<(String, Coordinates)>,
}

impl FixedGeocoder {
    /// Create an empty fixed backend (every lookup misses).
    pub const fn new() -> Self {
        Self { places: Vec::new() }
    }

    /// Add a known place to the table.
    #[must_use]
    pub fn with_place(mut self, name: &str, coordinates: Coordinates) -> Self {
        self.places.push((name.to_lowercase(), coordinates));
        self
    }

    /// Resolve a location from the table.
    fn geocode(&self, location: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let needle = location.to_lowercase();
        Ok(self
            .places
            .iter()
            .find(|(name, _)| *name == needle)
            .map(|(_, coordinates)| *coordinates))
    }
}
