//! Correlate command - Pearson correlation between two numeric fields.

use std::path::PathBuf;

use carstats::Field;
use colored::Colorize;

pub fn run(
    file: PathBuf,
    fuel: Field,
    engine: Field,
    multiplier: f64,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !Field::FUEL_METRICS.contains(&fuel) || !Field::ENGINE_METRICS.contains(&engine) {
        log::warn!(
            "Correlating {} with {}: outside the usual fuel/engine pairing",
            fuel,
            engine
        );
    }

    let (stats, dataset) = super::load(&file, multiplier)?;
    let stats = stats.with_correlation(fuel, engine)?;
    let cleaned = stats.initialize(&dataset.records);
    let correlation = stats.correlation(&cleaned.records);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&correlation)?);
        return Ok(());
    }

    let value = if correlation.is_defined() {
        let text = correlation.to_string();
        if correlation.value < 0.0 {
            text.red().bold()
        } else {
            text.green().bold()
        }
    } else {
        correlation.to_string().yellow().bold()
    };

    println!(
        "{} vs {}: {}",
        correlation.field_a.title().cyan(),
        correlation.field_b.title().cyan(),
        value
    );
    println!("  over {} paired records", correlation.pairs);
    if !correlation.is_defined() {
        println!(
            "  {}",
            "Undefined: fewer than two pairs or no variance".dimmed()
        );
    }

    Ok(())
}
