//! CLI command implementations.

pub mod clean;
pub mod correlate;
pub mod options;
pub mod rank;
pub mod report;
pub mod trend;

use std::path::Path;

use carstats::{CarStats, Dataset};

/// Build a pipeline with the given multiplier and load `file` through it.
pub(crate) fn load(
    file: &Path,
    multiplier: f64,
) -> Result<(CarStats, Dataset), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let stats = CarStats::new().with_multiplier(multiplier)?;
    let dataset = stats.load(file)?;
    log::debug!(
        "Loaded {} records from {} ({})",
        dataset.len(),
        dataset.source.file,
        dataset.source.hash
    );
    Ok((stats, dataset))
}

/// Format a statistic that may be undefined.
pub(crate) fn fmt_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", value)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/no/such/cars.json"), 1.5).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_load_rejects_bad_multiplier() {
        let file = test_support::dataset_file();
        assert!(load(file.path(), 0.0).is_err());
    }

    #[test]
    fn test_fmt_stat() {
        assert_eq!(fmt_stat(f64::NAN), "NaN");
        assert_eq!(fmt_stat(-0.756), "-0.76");
    }
}
