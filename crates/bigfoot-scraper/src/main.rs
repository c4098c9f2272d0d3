//! Offline dataset ingestion binary.
//!
//! Scrapes the source site's recently-added sighting reports, follows
//! each detail link, parses the labeled field/value pairs, geocodes
//! the sighting location, and rewrites the JSON dataset file the query
//! API loads at startup. The query service never sees a partial file:
//! the dataset is written to a temp path and renamed into place.
//!
//! # Pipeline
//!
//! ```text
//! listing page -> report ids -> detail pages -> fields -> geocode -> merge -> dataset.json
//! ```
//!
//! Runs to completion and exits; scheduling (cron or similar) is the
//! operator's concern.

mod config;
mod error;
mod parse;
mod pipeline;

use std::path::Path;

use bigfoot_geocode::Geocoder;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ScraperConfig;

/// Application entry point for the scrape job.
///
/// # Errors
///
/// Returns an error if configuration loading, geocoder construction,
/// the listing fetch, or the dataset write fails. Individual report
/// failures are logged and counted instead.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("bigfoot-scraper starting");

    // 2. Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scraper-config.yaml".to_owned());
    let config = if Path::new(&config_path).exists() {
        ScraperConfig::from_file(Path::new(&config_path))?
    } else {
        info!(config_path, "config file not found, using defaults");
        let mut config = ScraperConfig::default();
        config.apply_env_overrides();
        config
    };
    info!(
        listing_url = config.source.listing_url,
        output = config.output.path,
        max_concurrent = config.source.max_concurrent,
        "Configuration loaded"
    );

    // 3. Build the geocoding backend.
    let geocoder = Geocoder::from_config(&config.geocoder)?;
    info!(backend = geocoder.name(), "Geocoder ready");

    // 4. Run the pipeline and report the outcome.
    let outcome = pipeline::run(&config, &geocoder).await?;
    info!(
        listed = outcome.listed,
        parsed = outcome.parsed,
        geocoded = outcome.geocoded,
        failures = outcome.failures,
        total_written = outcome.total_written,
        "scrape complete"
    );

    Ok(())
}
