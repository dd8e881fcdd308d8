//! Statistical transforms over vehicle records.

mod correlation;
mod outlier;
mod rank;
pub mod stats;
mod temporal;

pub use correlation::{correlate, Correlation};
pub use outlier::{remove_outliers, Bounds, FieldBounds, OutlierFilter, OutlierSummary};
pub use rank::{rank, RankFilter, RankGroup, DEFAULT_RANK_LIMIT};
pub use temporal::{aggregate_by_year, combined_mpg, AggregatePoint};
