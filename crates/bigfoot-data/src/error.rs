//! Error types for the `bigfoot-data` crate.
//!
//! All load failures are fatal to the serving process: a dataset that
//! fails validation refuses to serve rather than serving partial data.

/// Errors that can occur while loading and validating the dataset file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset file could not be read from disk.
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file content is not a JSON array of report objects.
    #[error("failed to parse dataset JSON: {source}")]
    Parse {
        /// The underlying JSON parse error.
        #[from]
        source: serde_json::Error,
    },

    /// One or more required columns are absent from the dataset.
    #[error("dataset is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// The missing column names, in required-column order.
        columns: Vec<String>,
    },

    /// A row passed the column check but could not be typed.
    #[error("dataset row {index} is malformed: {source}")]
    Row {
        /// Zero-based row index within the JSON array.
        index: usize,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },
}
