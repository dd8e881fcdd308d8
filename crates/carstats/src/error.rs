//! Error types for the carstats library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for carstats operations.
#[derive(Debug, Error)]
pub enum CarStatsError {
    /// A numeric field name that is not in the accessor table.
    #[error("Unknown field: '{0}'")]
    UnknownField(String),

    /// A categorical attribute name that is not in the accessor table.
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    /// IQR multiplier must be a finite, strictly positive number.
    #[error("Invalid IQR multiplier: {0} (must be finite and > 0)")]
    InvalidMultiplier(f64),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no records to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CarStatsError {
    /// Returns true for errors raised while resolving selectors or settings,
    /// as opposed to errors reading input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CarStatsError::UnknownField(_)
                | CarStatsError::UnknownCategory(_)
                | CarStatsError::InvalidMultiplier(_)
                | CarStatsError::Config(_)
        )
    }
}

/// Result type alias for carstats operations.
pub type Result<T> = std::result::Result<T, CarStatsError>;
