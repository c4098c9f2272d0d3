//! Error types for the scrape pipeline.
//!
//! Per-report failures are logged and counted rather than aborting the
//! run; these variants cover the run-level failures that do abort.

/// Errors that can occur during a scrape run.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request could not be sent or completed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A page answered with a non-success status code.
    #[error("{url} returned {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The HTTP status line.
        status: String,
    },

    /// A CSS selector failed to parse.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// The dataset file could not be read or written.
    #[error("failed to read or write {path}: {source}")]
    Io {
        /// The file path involved.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Dataset serialization or deserialization failed.
    #[error("dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The geocoding provider failed at the run level.
    #[error("geocoding failed: {0}")]
    Geocode(#[from] bigfoot_geocode::GeocodeError),
}
