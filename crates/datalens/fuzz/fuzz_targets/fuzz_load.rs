//! Fuzz target for the CSV loader.
//!
//! Loading arbitrary bytes must return a dataset or an error, never panic,
//! and a loaded dataset must profile and correlate cleanly.

#![no_main]

use datalens::{DataLens, correlate, profile, summarize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let lens = DataLens::new();
    if let Ok((dataset, _)) = lens.load(data, "fuzz.csv") {
        let profile = profile(&dataset);
        assert_eq!(profile.rows, dataset.row_count());

        let matrix = correlate(&dataset);
        for a in matrix.columns() {
            for b in matrix.columns() {
                let r = matrix.get(a, b).unwrap_or_default();
                assert!((-1.0..=1.0).contains(&r));
            }
        }

        let _ = summarize(&profile);
    }
});
