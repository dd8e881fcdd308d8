//! Example: Analyze a vehicle dataset with CarStats.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path> [rank_metric]
//!
//! Example:
//!   cargo run --example analyze -- data/cars.json horsepower

use std::env;
use std::path::Path;

use carstats::{CarStats, Field};

fn main() -> carstats::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path> [rank_metric]");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- data/cars.json horsepower");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let rank_metric = match args.get(2) {
        Some(name) => name.parse::<Field>()?,
        None => Field::CityMpg,
    };

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("CarStats Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let stats = CarStats::new().with_rank_metric(rank_metric);
    let report = stats.analyze(path)?;

    if let Some(source) = &report.source {
        println!("## Source Metadata");
        println!("  File: {}", source.file);
        println!("  Format: {}", source.format);
        println!("  Records: {}", source.record_count);
        println!("  Skipped: {}", source.skipped_count);
        println!();
    }

    // Outlier screening
    let outliers = &report.outliers;
    println!(
        "## Outliers (x{} IQR): kept {} of {}",
        outliers.multiplier, outliers.retained_count, outliers.input_count
    );
    for fb in &outliers.bounds {
        println!(
            "  {:25} [{:>9.2}, {:>9.2}]  n={:<6} rejected={}",
            fb.field.title(),
            fb.bounds.lower,
            fb.bounds.upper,
            fb.sample_size,
            outliers.rejections_by_field.get(&fb.field).copied().unwrap_or(0)
        );
    }
    println!();

    // Trend
    println!("## Fuel Economy by Year");
    println!("  {:6} {:>8} {:>8} {:>9}", "Year", "City", "Highway", "Combined");
    for point in &report.trend {
        println!(
            "  {:<6} {:>8.2} {:>8.2} {:>9.2}",
            point.year, point.city, point.highway, point.combined
        );
    }
    println!();

    // Correlation
    let c = &report.correlation;
    println!(
        "## Correlation: {} vs {} = {} ({} pairs)",
        c.field_a.title(),
        c.field_b.title(),
        c,
        c.pairs
    );
    println!();

    // Ranking
    println!("## Top {} by {}", report.ranking.len(), report.rank_metric.title());
    for group in &report.ranking {
        let names: Vec<&str> = group.members.iter().map(|r| r.id()).collect();
        println!("  #{:<3} {:>8}  {}", group.rank, group.value, names.join(", "));
    }
    println!();

    println!("{}", separator);
    Ok(())
}
