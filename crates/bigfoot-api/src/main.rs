//! Query API server binary.
//!
//! Loads configuration, validates and loads the sighting dataset,
//! builds the geocoding backend, and serves the query API.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `bigfoot-config.yaml` (defaults if absent)
//! 3. Load and validate the dataset (missing columns are fatal)
//! 4. Build the geocoding backend
//! 5. Serve until terminated

use std::path::Path;
use std::sync::Arc;

use bigfoot_api::config::AppConfig;
use bigfoot_api::server::start_server;
use bigfoot_api::state::AppState;
use bigfoot_data::Dataset;
use bigfoot_geocode::Geocoder;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point for the query API server.
///
/// # Errors
///
/// Returns an error if configuration, dataset validation, geocoder
/// construction, or serving fails. A dataset that fails validation
/// means the process refuses to start.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("bigfoot-api starting");

    // 2. Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bigfoot-config.yaml".to_owned());
    let config = if Path::new(&config_path).exists() {
        AppConfig::from_file(Path::new(&config_path))?
    } else {
        info!(config_path, "config file not found, using defaults");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        config
    };
    info!(
        host = config.http.host,
        port = config.http.port,
        dataset = config.dataset.path,
        "Configuration loaded"
    );

    // 3. Load and validate the dataset. Fatal on any validation error.
    let dataset = Dataset::load(Path::new(&config.dataset.path))?;
    info!(report_count = dataset.len(), "Dataset validated");

    // 4. Build the geocoding backend.
    let geocoder = Geocoder::from_config(&config.geocoder)?;
    info!(backend = geocoder.name(), "Geocoder ready");

    // 5. Serve.
    let state = Arc::new(AppState::new(
        dataset,
        geocoder,
        config.query.default_radius_km,
    ));
    start_server(&config.http, state).await?;

    Ok(())
}
