//! CarStats: derived analytics for vehicle datasets.
//!
//! Takes a collection of vehicle records and produces an outlier-filtered
//! subset, per-year fuel-economy trends, a fuel/engine correlation and a
//! top-N ranking with ties collapsed into groups.
//!
//! # Core Principles
//!
//! - **Pure**: every operation is a plain function of its inputs
//! - **Non-destructive**: input records are never modified
//! - **Explicit gaps**: missing values stay `None`, undefined statistics are NaN
//!
//! # Example
//!
//! ```no_run
//! use carstats::{CarStats, Field};
//!
//! let stats = CarStats::new().with_rank_metric(Field::Horsepower);
//! let dataset = stats.load("cars.json").unwrap();
//! let cleaned = stats.initialize(&dataset.records);
//!
//! for point in stats.trend(&cleaned.records) {
//!     println!("{}: {:.1} city / {:.1} highway", point.year, point.city, point.highway);
//! }
//! println!("Correlation: {}", stats.correlation(&cleaned.records));
//! ```

pub mod analysis;
pub mod error;
pub mod field;
pub mod input;
pub mod record;

mod carstats;

pub use crate::carstats::{AnalysisReport, CarStats, CarStatsConfig, CleanedDataset, FilterOptions};
pub use analysis::{
    aggregate_by_year, correlate, rank, remove_outliers, AggregatePoint, Bounds, Correlation,
    FieldBounds, OutlierFilter, OutlierSummary, RankFilter, RankGroup, DEFAULT_RANK_LIMIT,
};
pub use error::{CarStatsError, Result};
pub use field::{Category, Field, FieldSpec};
pub use input::{Dataset, DatasetFormat, DatasetLoader, LoaderConfig, SourceMetadata};
pub use record::VehicleRecord;
