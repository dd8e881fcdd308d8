//! Pairwise correlation between two numeric fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::stats::sample_correlation;
use crate::field::Field;
use crate::record::VehicleRecord;

/// Correlation between two fields over a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub field_a: Field,
    pub field_b: Field,
    /// Pearson sample coefficient in [-1, 1]; NaN when undefined.
    pub value: f64,
    /// Records where both fields were numeric.
    pub pairs: usize,
}

impl Correlation {
    pub fn is_defined(&self) -> bool {
        !self.value.is_nan()
    }
}

impl fmt::Display for Correlation {
    /// Two decimal places; `NaN` when undefined.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_nan() {
            f.write_str("NaN")
        } else {
            write!(f, "{:.2}", self.value)
        }
    }
}

/// Correlate `field_a` with `field_b`.
///
/// A record contributes only when both fields hold numbers; missing values
/// are skipped, never filled with zero.
pub fn correlate(records: &[VehicleRecord], field_a: Field, field_b: Field) -> Correlation {
    let mut xs = Vec::with_capacity(records.len());
    let mut ys = Vec::with_capacity(records.len());

    for record in records {
        if let (Some(a), Some(b)) = (field_a.extract(record), field_b.extract(record)) {
            xs.push(a);
            ys.push(b);
        }
    }

    Correlation {
        field_a,
        field_b,
        value: sample_correlation(&xs, &ys),
        pairs: xs.len(),
    }
}
