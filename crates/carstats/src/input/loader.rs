//! Dataset loader for JSON and delimited files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::source::{is_null_value, Dataset, SourceMetadata};
use crate::error::{CarStatsError, Result};
use crate::field::{Category, Field};
use crate::record::VehicleRecord;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Input file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetFormat {
    /// Top-level array of nested vehicle objects.
    Json,
    /// Header row of dotted field paths, one record per row.
    Delimited,
}

impl DatasetFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DatasetFormat::Json),
            "csv" | "tsv" | "txt" | "psv" => Some(DatasetFormat::Delimited),
            _ => None,
        }
    }

    /// Guess the format from file contents: a leading `[` means JSON.
    pub fn sniff(bytes: &[u8]) -> Self {
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'[') => DatasetFormat::Json,
            _ => DatasetFormat::Delimited,
        }
    }
}

/// Loader configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Input format (None = detect from extension, then contents).
    pub format: Option<DatasetFormat>,
    /// Delimiter for delimited input (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum records to read (None = all).
    pub max_records: Option<usize>,
}

/// Loads vehicle datasets from disk.
#[derive(Debug)]
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    /// Create a new loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file into a dataset.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| CarStatsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let size_bytes = file
            .metadata()
            .map_err(|e| CarStatsError::Io {
                path: path.to_path_buf(),
                source: e,
            })?
            .len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| CarStatsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let format = self
            .config
            .format
            .or_else(|| DatasetFormat::from_extension(path))
            .unwrap_or_else(|| DatasetFormat::sniff(&contents));

        let (records, skipped, format_name) = match format {
            DatasetFormat::Json => {
                let (records, skipped) = self.parse_json(&contents)?;
                (records, skipped, "json".to_string())
            }
            DatasetFormat::Delimited => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(&contents)?,
                };
                let (records, skipped) = self.parse_delimited(&contents, delimiter)?;
                let name = match delimiter {
                    b'\t' => "tsv",
                    b',' => "csv",
                    b';' => "csv-semicolon",
                    b'|' => "psv",
                    _ => "delimited",
                };
                (records, skipped, name.to_string())
            }
        };

        log::info!(
            "Loaded {} records from {} ({}, {} skipped)",
            records.len(),
            path.display(),
            format_name,
            skipped
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_name,
            records.len(),
            skipped,
        );

        Ok(Dataset { records, source })
    }

    /// Parse in-memory bytes in the given format.
    pub fn parse_bytes(&self, bytes: &[u8], format: DatasetFormat) -> Result<Vec<VehicleRecord>> {
        match format {
            DatasetFormat::Json => self.parse_json(bytes).map(|(records, _)| records),
            DatasetFormat::Delimited => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(bytes)?,
                };
                self.parse_delimited(bytes, delimiter).map(|(records, _)| records)
            }
        }
    }

    /// Parse a JSON array of records. Returns the records and a skip count.
    fn parse_json(&self, bytes: &[u8]) -> Result<(Vec<VehicleRecord>, usize)> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(CarStatsError::EmptyData("No JSON content".to_string()));
        }

        let values: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;

        let mut records = Vec::with_capacity(values.len());
        let mut skipped = 0;
        for (idx, value) in values.into_iter().enumerate() {
            if let Some(max) = self.config.max_records {
                if records.len() >= max {
                    break;
                }
            }

            if !value.is_object() {
                log::warn!("Skipping element {}: not an object", idx);
                skipped += 1;
                continue;
            }
            match serde_json::from_value::<VehicleRecord>(value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("Skipping element {}: {}", idx, e);
                    skipped += 1;
                }
            }
        }

        if records.is_empty() {
            return Err(CarStatsError::EmptyData("No records found".to_string()));
        }

        Ok((records, skipped))
    }

    /// Parse delimited text with a header row of field paths.
    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<(Vec<VehicleRecord>, usize)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let columns: Vec<Option<Column>> = reader.headers()?.iter().map(Column::resolve).collect();

        if columns.iter().all(Option::is_none) {
            return Err(CarStatsError::EmptyData(
                "No recognised vehicle columns in header".to_string(),
            ));
        }
        for (header, column) in reader.headers()?.iter().zip(&columns) {
            if column.is_none() {
                log::debug!("Ignoring unknown column '{}'", header);
            }
        }

        let mut records = Vec::new();
        let mut skipped = 0;
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_records {
                if records.len() >= max {
                    break;
                }
            }

            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    log::warn!("Skipping row {}: {}", row_idx + 1, e);
                    skipped += 1;
                    continue;
                }
            };

            let mut record = VehicleRecord::default();
            for (cell, column) in row.iter().zip(&columns) {
                if let Some(column) = column {
                    column.apply(&mut record, cell);
                }
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(CarStatsError::EmptyData("No data rows found".to_string()));
        }

        Ok((records, skipped))
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// A recognised column of delimited input.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Numeric(Field),
    Text(Category),
    Id,
    ModelYear,
    Hybrid,
}

impl Column {
    fn resolve(header: &str) -> Option<Column> {
        if let Ok(field) = Field::resolve(header) {
            return Some(Column::Numeric(field));
        }
        if let Ok(category) = Category::resolve(header) {
            return Some(Column::Text(category));
        }
        match header.trim().to_lowercase().as_str() {
            "identification.id" | "id" => Some(Column::Id),
            "identification.model year" | "model year" | "model_year" => Some(Column::ModelYear),
            "engine information.hybrid" | "hybrid" => Some(Column::Hybrid),
            _ => None,
        }
    }

    fn apply(self, record: &mut VehicleRecord, cell: &str) {
        match self {
            Column::Numeric(field) => {
                let value = parse_number(cell);
                let slot = match field {
                    Field::Height => &mut record.dimensions.height,
                    Field::Length => &mut record.dimensions.length,
                    Field::Width => &mut record.dimensions.width,
                    Field::ForwardGears => &mut record.engine.forward_gears,
                    Field::Horsepower => &mut record.engine.statistics.horsepower,
                    Field::Torque => &mut record.engine.statistics.torque,
                    Field::CityMpg => &mut record.fuel.city_mpg,
                    Field::HighwayMpg => &mut record.fuel.highway_mpg,
                    Field::Year => &mut record.identification.year,
                };
                *slot = value;
            }
            Column::Text(category) => {
                let slot = match category {
                    Category::Driveline => &mut record.engine.driveline,
                    Category::Transmission => &mut record.engine.transmission,
                    Category::EngineType => &mut record.engine.engine_type,
                    Category::FuelType => &mut record.fuel.fuel_type,
                    Category::Make => &mut record.identification.make,
                    Category::Classification => &mut record.identification.classification,
                };
                *slot = parse_text(cell);
            }
            Column::Id => record.identification.id = parse_text(cell),
            Column::ModelYear => record.identification.model_year = parse_text(cell),
            Column::Hybrid => record.engine.hybrid = parse_bool(cell),
        }
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    if is_null_value(cell) {
        return None;
    }
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_text(cell: &str) -> Option<String> {
    if is_null_value(cell) {
        None
    } else {
        Some(cell.trim().to_string())
    }
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Pick the delimiter for delimited input.
///
/// Each candidate splits the header row; the one yielding the most
/// recognised vehicle columns wins. Ties go to the candidate whose data rows
/// split into as many cells as the header, then to the one with more cells,
/// then to the earlier entry of `DELIMITERS`. Falls back to comma when no
/// candidate splits the header at all.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let Some((header, rows)) = lines.split_first() else {
        return Err(CarStatsError::EmptyData("No lines to analyze".to_string()));
    };

    let mut best: Option<(u8, (usize, usize, usize))> = None;
    for &delim in DELIMITERS {
        let cells = split_cells(header, delim);
        if cells.len() < 2 {
            continue;
        }

        let recognised = cells.iter().filter(|c| Column::resolve(c).is_some()).count();
        let aligned = rows
            .iter()
            .filter(|row| split_cells(row, delim).len() == cells.len())
            .count();
        let score = (recognised, aligned, cells.len());

        if best.is_none_or(|(_, top)| score > top) {
            best = Some((delim, score));
        }
    }

    if let Some((delim, (recognised, _, _))) = best {
        log::debug!(
            "Detected delimiter {:?} ({} recognised columns)",
            delim as char,
            recognised
        );
    }
    Ok(best.map_or(b',', |(delim, _)| delim))
}

/// Split a line on `delimiter` outside double quotes, trimming each cell.
fn split_cells(line: &str, delimiter: u8) -> Vec<&str> {
    let delim = delimiter as char;
    let mut cells = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, ch) in line.char_indices() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delim && !in_quotes {
            cells.push(line[start..i].trim().trim_matches('"'));
            start = i + ch.len_utf8();
        }
    }
    cells.push(line[start..].trim().trim_matches('"'));
    cells
}
