//! Fuzz target for the analysis pipeline.
//!
//! Anything the loader accepts must flow through outlier screening, trend
//! aggregation, correlation and ranking without panicking.

#![no_main]

use carstats::{CarStats, DatasetFormat, DatasetLoader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let loader = DatasetLoader::new();
    let format = DatasetFormat::sniff(data);
    if let Ok(records) = loader.parse_bytes(data, format) {
        let report = CarStats::new().analyze_records(&records);

        // Ranked groups must be strictly descending
        for pair in report.ranking.windows(2) {
            assert!(pair[0].value > pair[1].value);
        }
        // Trend years must be strictly ascending
        for pair in report.trend.windows(2) {
            assert!(pair[0].year < pair[1].year);
        }
    }
});
