//! Report command - run the whole pipeline.

use std::fs;
use std::path::PathBuf;

use carstats::{CarStats, CarStatsConfig, Field};
use colored::Colorize;

use super::fmt_stat;
use super::rank::build_rank_filter;

/// Report flags collected from the command line.
pub struct ReportOptions {
    pub multiplier: f64,
    pub fuel: Field,
    pub engine: Field,
    pub metric: Field,
    pub limit: usize,
    pub driveline: Option<String>,
    pub transmission: Option<String>,
    pub filter: Vec<String>,
}

impl ReportOptions {
    fn config(&self) -> Result<CarStatsConfig, Box<dyn std::error::Error>> {
        Ok(CarStatsConfig {
            iqr_multiplier: self.multiplier,
            fuel_metric: self.fuel,
            engine_metric: self.engine,
            rank_metric: self.metric,
            rank_filter: build_rank_filter(
                self.driveline.as_deref(),
                self.transmission.as_deref(),
                &self.filter,
            )?,
            rank_limit: self.limit,
            ..CarStatsConfig::default()
        })
    }
}

pub fn run(
    file: PathBuf,
    options: ReportOptions,
    output: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let stats = CarStats::with_config(options.config()?)?;
    let report = stats.analyze(&file)?;

    if let Some(path) = &output {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        log::info!("Saved report to {}", path.display());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(source) = &report.source {
        println!("{} {}", "Report for".cyan().bold(), source.file.white());
        println!("  {} records, {}", source.record_count, source.hash.dimmed());
        println!();
    }

    let outliers = &report.outliers;
    println!("{}", "Outliers:".yellow().bold());
    println!(
        "  kept {} of {} (x{} IQR)",
        outliers.retained_count.to_string().green(),
        outliers.input_count,
        outliers.multiplier
    );
    println!();

    println!("{}", "Trend:".yellow().bold());
    for point in &report.trend {
        println!(
            "  {}  city {:>6}  highway {:>6}  combined {:>6}",
            point.year,
            fmt_stat(point.city),
            fmt_stat(point.highway),
            fmt_stat(point.combined)
        );
    }
    println!();

    let c = &report.correlation;
    println!("{}", "Correlation:".yellow().bold());
    println!(
        "  {} vs {}: {} ({} pairs)",
        c.field_a.title(),
        c.field_b.title(),
        c.to_string().bold(),
        c.pairs
    );
    println!();

    println!(
        "{} {}",
        "Top".yellow().bold(),
        report.rank_metric.title().yellow().bold()
    );
    let filter = &stats.config().rank_filter;
    if !filter.is_empty() {
        let constraints: Vec<String> = filter
            .predicates()
            .map(|(category, value)| format!("{}={}", category, value))
            .collect();
        println!("  where {}", constraints.join(", "));
    }
    for group in &report.ranking {
        let ids: Vec<&str> = group.members.iter().map(|r| r.id()).collect();
        println!("  #{:<3} {:>8}  {}", group.rank, group.value, ids.join(", "));
    }

    if let Some(path) = output {
        println!();
        println!("{} {}", "Saved report to".green(), path.display());
    }

    Ok(())
}
