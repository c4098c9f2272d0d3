//! Configuration loading and typed config structures for the query API.
//!
//! The canonical configuration lives in `bigfoot-config.yaml` next to
//! the binary. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader that reads and validates
//! the file. Every field has a default so a missing file still yields
//! a runnable development configuration.

use std::path::Path;

use bigfoot_geocode::GeocoderConfig;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level query API configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Dataset file settings.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Geocoding provider settings.
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Query behavior settings.
    #[serde(default)]
    pub query: QueryConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `GOOGLE_MAPS_API_KEY` overrides `geocoder.api_key`
    /// - `BIGFOOT_DATASET` overrides `dataset.path`
    /// - `BIGFOOT_PORT` overrides `http.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override config values with environment variables when set.
    ///
    /// This lets deployments inject the API key and dataset location
    /// without editing the YAML file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GOOGLE_MAPS_API_KEY") {
            self.geocoder.api_key = val;
        }
        if let Ok(val) = std::env::var("BIGFOOT_DATASET") {
            self.dataset.path = val;
        }
        if let Ok(val) = std::env::var("BIGFOOT_PORT")
            && let Ok(port) = val.parse::<u16>()
        {
            self.http.port = port;
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Dataset file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    /// Path to the JSON dataset produced by the offline scraper.
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

/// Query behavior configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryConfig {
    /// Radius applied when a nearby-sightings request omits `radius`.
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_dataset_path() -> String {
    "data/bigfoot_reports.json".to_owned()
}

const fn default_radius_km() -> f64 {
    50.0
}
