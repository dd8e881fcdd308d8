//! Main CarStats struct and public API.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analysis::{
    aggregate_by_year, correlate, rank, AggregatePoint, Correlation, OutlierFilter,
    OutlierSummary, RankFilter, RankGroup, DEFAULT_RANK_LIMIT,
};
use crate::error::{CarStatsError, Result};
use crate::field::{Category, Field};
use crate::input::{Dataset, DatasetLoader, LoaderConfig, SourceMetadata};
use crate::record::VehicleRecord;

/// Configuration for a CarStats session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarStatsConfig {
    /// Loader configuration.
    pub loader: LoaderConfig,
    /// IQR multiplier for outlier screening.
    pub iqr_multiplier: f64,
    /// Fuel-economy side of the correlation.
    pub fuel_metric: Field,
    /// Engine side of the correlation.
    pub engine_metric: Field,
    /// Metric the ranking is sorted by.
    pub rank_metric: Field,
    /// Categorical predicates applied before ranking.
    pub rank_filter: RankFilter,
    /// Maximum number of rank groups.
    pub rank_limit: usize,
}

impl Default for CarStatsConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            iqr_multiplier: OutlierFilter::DEFAULT_MULTIPLIER,
            fuel_metric: Field::CityMpg,
            engine_metric: Field::Torque,
            rank_metric: Field::CityMpg,
            rank_filter: RankFilter::default(),
            rank_limit: DEFAULT_RANK_LIMIT,
        }
    }
}

/// Records that survived outlier screening, with the screening summary.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub records: Vec<VehicleRecord>,
    pub summary: OutlierSummary,
}

/// Distinct categorical values available as filter options.
pub type FilterOptions = IndexMap<Category, Vec<String>>;

/// Everything derived from one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Metadata about the source file, when loaded from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Outlier screening summary.
    pub outliers: OutlierSummary,
    /// Per-year fuel-economy averages.
    pub trend: Vec<AggregatePoint>,
    /// Fuel vs engine correlation.
    pub correlation: Correlation,
    /// Metric the ranking used.
    pub rank_metric: Field,
    /// Top rank groups.
    pub ranking: Vec<RankGroup>,
    /// Driveline and transmission options from the raw input.
    pub options: FilterOptions,
}

/// The main analysis pipeline.
#[derive(Debug)]
pub struct CarStats {
    config: CarStatsConfig,
    outlier_filter: OutlierFilter,
    loader: DatasetLoader,
}

impl CarStats {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        let config = CarStatsConfig::default();
        Self {
            loader: DatasetLoader::with_config(config.loader.clone()),
            outlier_filter: OutlierFilter::new(),
            config,
        }
    }

    /// Create a pipeline with custom configuration.
    ///
    /// Fails if the configuration is invalid (e.g. a non-positive multiplier).
    pub fn with_config(config: CarStatsConfig) -> Result<Self> {
        let outlier_filter = OutlierFilter::with_multiplier(config.iqr_multiplier)?;
        check_correlation_fields(config.fuel_metric, config.engine_metric)?;
        Ok(Self {
            loader: DatasetLoader::with_config(config.loader.clone()),
            outlier_filter,
            config,
        })
    }

    pub fn config(&self) -> &CarStatsConfig {
        &self.config
    }

    /// Set the IQR multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Result<Self> {
        self.outlier_filter = OutlierFilter::with_multiplier(multiplier)?;
        self.config.iqr_multiplier = multiplier;
        Ok(self)
    }

    /// Set the two correlated fields. They must differ.
    pub fn with_correlation(mut self, fuel_metric: Field, engine_metric: Field) -> Result<Self> {
        check_correlation_fields(fuel_metric, engine_metric)?;
        self.config.fuel_metric = fuel_metric;
        self.config.engine_metric = engine_metric;
        Ok(self)
    }

    /// Set the ranking metric.
    pub fn with_rank_metric(mut self, metric: Field) -> Self {
        self.config.rank_metric = metric;
        self
    }

    /// Set the ranking predicates.
    pub fn with_rank_filter(mut self, filter: RankFilter) -> Self {
        self.config.rank_filter = filter;
        self
    }

    /// Set the maximum number of rank groups.
    pub fn with_rank_limit(mut self, limit: usize) -> Self {
        self.config.rank_limit = limit;
        self
    }

    /// Load a dataset file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        self.loader.load_file(path)
    }

    /// Screen `records` for outliers and return the cleaned set.
    ///
    /// Call this once per dataset and pass the result to the other
    /// operations; nothing is cached between calls.
    pub fn initialize(&self, records: &[VehicleRecord]) -> CleanedDataset {
        let (records, summary) = self.outlier_filter.filter_with_summary(records);
        log::info!("Cleaned data length: {}", records.len());
        CleanedDataset { records, summary }
    }

    /// Per-year averages over `records`.
    pub fn trend(&self, records: &[VehicleRecord]) -> Vec<AggregatePoint> {
        aggregate_by_year(records)
    }

    /// Configured fuel/engine correlation over `records`.
    pub fn correlation(&self, records: &[VehicleRecord]) -> Correlation {
        correlate(records, self.config.fuel_metric, self.config.engine_metric)
    }

    /// Configured ranking over `records`.
    pub fn ranking(&self, records: &[VehicleRecord]) -> Vec<RankGroup> {
        rank(
            records,
            &self.config.rank_filter,
            self.config.rank_metric,
            self.config.rank_limit,
        )
    }

    /// Driveline and transmission options present in `records`.
    pub fn filter_options(&self, records: &[VehicleRecord]) -> FilterOptions {
        [Category::Driveline, Category::Transmission]
            .into_iter()
            .map(|c| (c, c.distinct_values(records)))
            .collect()
    }

    /// Load a file and run the whole pipeline.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let dataset = self.load(path)?;
        let mut report = self.analyze_records(&dataset.records);
        report.source = Some(dataset.source);
        Ok(report)
    }

    /// Run the whole pipeline over in-memory records.
    pub fn analyze_records(&self, records: &[VehicleRecord]) -> AnalysisReport {
        let cleaned = self.initialize(records);

        AnalysisReport {
            source: None,
            trend: self.trend(&cleaned.records),
            correlation: self.correlation(&cleaned.records),
            rank_metric: self.config.rank_metric,
            ranking: self.ranking(&cleaned.records),
            options: self.filter_options(records),
            outliers: cleaned.summary,
        }
    }
}

impl Default for CarStats {
    fn default() -> Self {
        Self::new()
    }
}

fn check_correlation_fields(fuel_metric: Field, engine_metric: Field) -> Result<()> {
    if fuel_metric == engine_metric {
        return Err(CarStatsError::Config(format!(
            "correlation needs two different fields, got '{}' twice",
            fuel_metric
        )));
    }
    Ok(())
}
