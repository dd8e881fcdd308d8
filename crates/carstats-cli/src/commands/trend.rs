//! Trend command - per-year fuel-economy averages.

use std::path::PathBuf;

use colored::Colorize;

use super::fmt_stat;

pub fn run(
    file: PathBuf,
    multiplier: f64,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (stats, dataset) = super::load(&file, multiplier)?;
    let cleaned = stats.initialize(&dataset.records);
    let trend = stats.trend(&cleaned.records);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&trend)?);
        return Ok(());
    }

    println!("{}", "Fuel economy by year".cyan().bold());
    println!();

    if trend.is_empty() {
        println!("{}", "No records with a year and mpg values".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:>8} {:>8} {:>9}",
        "Year".bold(),
        "City".bold(),
        "Highway".bold(),
        "Combined".bold()
    );
    for point in &trend {
        println!(
            "  {:<6} {:>8} {:>8} {:>9}",
            point.year,
            fmt_stat(point.city),
            fmt_stat(point.highway),
            fmt_stat(point.combined)
        );
    }

    Ok(())
}
