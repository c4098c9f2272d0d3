//! Configuration loading and typed config structures for the scraper.
//!
//! Mirrors the query API's config module: YAML with per-field defaults
//! and environment overrides, so the job runs with no config file at
//! all during development.

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

/// Top-level scraper configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScraperConfig {
    /// Source site settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Dataset output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Geocoding provider settings.
    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

impl ScraperConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `GOOGLE_MAPS_API_KEY` overrides `geocoder.api_key`
    /// - `BIGFOOT_DATASET` overrides `output.path`
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
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GOOGLE_MAPS_API_KEY") {
            self.geocoder.api_key = val;
        }
        if let Ok(val) = std::env::var("BIGFOOT_DATASET") {
            self.output.path = val;
        }
    }
}

/// Source site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// URL of the recently-added reports listing page.
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Base URL of a report detail page (the report id is appended as
    /// the `id` query parameter).
    #[serde(default = "default_report_url")]
    pub report_url: String,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay between detail-page requests in milliseconds.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Maximum concurrent detail-page fetches.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            report_url: default_report_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            request_delay_ms: default_request_delay_ms(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// Dataset output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON dataset file consumed by the query API.
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_listing_url() -> String {
    "https://www.bfro.net/GDB/newadd.asp?Show=AB".to_owned()
}

fn default_report_url() -> String {
    "https://www.bfro.net/GDB/show_report.asp".to_owned()
}

fn default_user_agent() -> String {
    "bigfoot-scraper/0.1".to_owned()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_request_delay_ms() -> u64 {
    500
}

const fn default_max_concurrent() -> usize {
    4
}

fn default_output_path() -> String {
    "data/bigfoot_reports.json".to_owned()
}
