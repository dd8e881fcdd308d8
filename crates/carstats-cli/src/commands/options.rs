//! Options command - distinct category values usable as rank filters.

use std::path::PathBuf;

use carstats::{Category, FilterOptions};
use colored::Colorize;

pub fn run(file: PathBuf, all: bool, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let stats = carstats::CarStats::new();
    let dataset = stats.load(&file)?;

    // Options come from the raw records so screened-out values stay selectable.
    let options: FilterOptions = if all {
        Category::ALL
            .into_iter()
            .map(|c| (c, c.distinct_values(&dataset.records)))
            .collect()
    } else {
        stats.filter_options(&dataset.records)
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    for (category, values) in &options {
        println!(
            "{} ({})",
            category.to_string().cyan().bold(),
            values.len()
        );
        for value in values {
            println!("  {}", value);
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::dataset_file;

    #[test]
    fn test_options_runs() {
        let file = dataset_file();
        assert!(run(file.path().to_path_buf(), false, true).is_ok());
        assert!(run(file.path().to_path_buf(), true, false).is_ok());
    }
}
