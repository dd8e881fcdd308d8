//! Clean command - remove IQR outliers and report what was dropped.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

pub fn run(
    file: PathBuf,
    multiplier: f64,
    output: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (stats, dataset) = super::load(&file, multiplier)?;
    let cleaned = stats.initialize(&dataset.records);

    if let Some(path) = &output {
        fs::write(path, serde_json::to_string_pretty(&cleaned.records)?)?;
        log::info!("Wrote {} cleaned records to {}", cleaned.records.len(), path.display());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&cleaned.summary)?);
        return Ok(());
    }

    let summary = &cleaned.summary;
    println!(
        "{} {}",
        "Outlier screening for".cyan().bold(),
        dataset.source.file.white()
    );
    println!();
    println!(
        "Kept {} of {} records ({} removed, x{} IQR)",
        summary.retained_count.to_string().green().bold(),
        summary.input_count,
        summary.removed_count.to_string().red(),
        summary.multiplier
    );
    println!();

    println!("{}", "Bounds:".yellow().bold());
    for fb in &summary.bounds {
        let rejected = summary
            .rejections_by_field
            .get(&fb.field)
            .copied()
            .unwrap_or(0);
        let range = if fb.bounds.is_unbounded() {
            "unbounded".dimmed().to_string()
        } else {
            format!("[{:.2}, {:.2}]", fb.bounds.lower, fb.bounds.upper)
        };
        let rejected = if rejected > 0 {
            rejected.to_string().red().to_string()
        } else {
            rejected.to_string()
        };
        println!(
            "  {:25} {:28} n={:<6} rejected={}",
            fb.field.title(),
            range,
            fb.sample_size,
            rejected
        );
    }

    if let Some(path) = output {
        println!();
        println!("{} {}", "Saved cleaned records to".green(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::dataset_file;

    #[test]
    fn test_clean_writes_records() {
        let file = dataset_file();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cleaned.json");

        run(file.path().to_path_buf(), 1.5, Some(out.clone()), true).unwrap();

        let written: Vec<carstats::VehicleRecord> =
            serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written.len(), 4);
    }
}
