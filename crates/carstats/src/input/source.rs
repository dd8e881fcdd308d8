//! Loaded dataset and its source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::VehicleRecord;

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (json, csv, tsv, ...).
    pub format: String,
    /// Number of records loaded.
    pub record_count: usize,
    /// Rows or array elements that could not be read as records.
    pub skipped_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        record_count: usize,
        skipped_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            record_count,
            skipped_count,
            loaded_at: Utc::now(),
        }
    }
}

/// An immutable collection of vehicle records for one analysis session.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<VehicleRecord>,
    pub source: SourceMetadata,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cell spellings that mean "no value" in hand-assembled vehicle sheets.
const NULL_TOKENS: &[&str] = &["na", "n/a", "null", "none", "nil", "nan", "-", "."];

/// Whether a delimited cell stands for a missing value.
pub fn is_null_value(value: &str) -> bool {
    let cell = value.trim();
    cell.is_empty() || NULL_TOKENS.iter().any(|token| cell.eq_ignore_ascii_case(token))
}
