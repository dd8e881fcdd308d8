//! Fuzz target for the dataset loader.
//!
//! This fuzzer tests that the JSON and delimited loaders:
//! 1. Never panic on malformed input
//! 2. Handle arbitrary scalar types where numbers are expected
//! 3. Don't allocate unbounded memory

#![no_main]

use carstats::{DatasetFormat, DatasetLoader};
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let loader = DatasetLoader::new();

    // In-memory, both formats
    let _ = loader.parse_bytes(data, DatasetFormat::Json);
    let _ = loader.parse_bytes(data, DatasetFormat::Delimited);

    // From disk with format sniffing
    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let _ = loader.load_file(temp_file.path());
        }
    }
});
