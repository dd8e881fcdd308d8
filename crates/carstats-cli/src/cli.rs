//! CLI argument definitions using clap.

use carstats::{Field, OutlierFilter, DEFAULT_RANK_LIMIT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CarStats: outlier screening, trends, correlation and rankings for vehicle data
#[derive(Parser)]
#[command(name = "carstats")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove IQR outliers and summarize what was dropped
    Clean {
        /// Path to the dataset (JSON/CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// IQR multiplier
        #[arg(short, long, default_value_t = OutlierFilter::DEFAULT_MULTIPLIER)]
        multiplier: f64,

        /// Write the cleaned records to this path as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-year city, highway and combined mpg
    Trend {
        /// Path to the dataset (JSON/CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// IQR multiplier
        #[arg(short, long, default_value_t = OutlierFilter::DEFAULT_MULTIPLIER)]
        multiplier: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pearson correlation between a fuel metric and an engine metric
    Correlate {
        /// Path to the dataset (JSON/CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Fuel-economy field (city_mpg, highway_mpg)
        #[arg(short, long, default_value = "city_mpg")]
        fuel: Field,

        /// Engine field (torque, horsepower)
        #[arg(short, long, default_value = "torque")]
        engine: Field,

        /// IQR multiplier
        #[arg(short, long, default_value_t = OutlierFilter::DEFAULT_MULTIPLIER)]
        multiplier: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Top values of a metric with ties grouped
    Rank {
        /// Path to the dataset (JSON/CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Ranking metric (city_mpg, highway_mpg, horsepower, torque, ...)
        #[arg(long, default_value = "city_mpg")]
        metric: Field,

        /// Only rank this driveline
        #[arg(long)]
        driveline: Option<String>,

        /// Only rank this transmission
        #[arg(long)]
        transmission: Option<String>,

        /// Extra category filter as CATEGORY=VALUE (repeatable)
        #[arg(long, value_name = "CATEGORY=VALUE")]
        filter: Vec<String>,

        /// Maximum number of rank groups
        #[arg(short, long, default_value_t = DEFAULT_RANK_LIMIT)]
        limit: usize,

        /// IQR multiplier
        #[arg(short, long, default_value_t = OutlierFilter::DEFAULT_MULTIPLIER)]
        multiplier: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List distinct category values available as rank filters
    Options {
        /// Path to the dataset (JSON/CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// List every category, not just driveline and transmission
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the whole pipeline and print or save the report
    Report {
        /// Path to the dataset (JSON/CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// IQR multiplier
        #[arg(short, long, default_value_t = OutlierFilter::DEFAULT_MULTIPLIER)]
        multiplier: f64,

        /// Fuel-economy field for the correlation
        #[arg(short, long, default_value = "city_mpg")]
        fuel: Field,

        /// Engine field for the correlation
        #[arg(short, long, default_value = "torque")]
        engine: Field,

        /// Ranking metric
        #[arg(long, default_value = "city_mpg")]
        metric: Field,

        /// Maximum number of rank groups
        #[arg(short, long, default_value_t = DEFAULT_RANK_LIMIT)]
        limit: usize,

        /// Only rank this driveline
        #[arg(long)]
        driveline: Option<String>,

        /// Only rank this transmission
        #[arg(long)]
        transmission: Option<String>,

        /// Extra category filter as CATEGORY=VALUE (repeatable)
        #[arg(long, value_name = "CATEGORY=VALUE")]
        filter: Vec<String>,

        /// Write the JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
