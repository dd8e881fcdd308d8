//! Multi-field IQR outlier filtering.
//!
//! Bounds are recomputed from whatever records are passed in, so running the
//! filter again on its own output can remove further boundary records. That
//! is expected: the surviving distribution is narrower, and so are its bounds.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::stats::lower_index_quantile;
use crate::error::{CarStatsError, Result};
use crate::field::Field;
use crate::record::VehicleRecord;

/// Inclusive acceptance interval for one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// Accepts every value. Used for fields with no usable values.
    pub const UNBOUNDED: Bounds = Bounds {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    /// IQR bounds from an ascending slice, or [`Bounds::UNBOUNDED`] if empty.
    ///
    /// Q1 and Q3 use lower-index selection (`floor(0.25·n)`, `floor(0.75·n)`).
    pub fn from_sorted(sorted: &[f64], multiplier: f64) -> Bounds {
        let (Some(q1), Some(q3)) = (
            lower_index_quantile(sorted, 0.25),
            lower_index_quantile(sorted, 0.75),
        ) else {
            return Bounds::UNBOUNDED;
        };

        let iqr = q3 - q1;
        Bounds {
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower == f64::NEG_INFINITY && self.upper == f64::INFINITY
    }
}

/// Bounds computed for one field over a dataset snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub field: Field,
    pub bounds: Bounds,
    /// Number of non-null values the bounds were derived from.
    pub sample_size: usize,
}

/// What a filter pass did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierSummary {
    pub multiplier: f64,
    pub input_count: usize,
    pub retained_count: usize,
    pub removed_count: usize,
    pub bounds: Vec<FieldBounds>,
    /// Records rejected by each field. A record failing several fields is
    /// counted under each of them.
    pub rejections_by_field: IndexMap<Field, usize>,
}

/// Removes records that fall outside the IQR bounds of any screened field.
#[derive(Debug, Clone)]
pub struct OutlierFilter {
    multiplier: f64,
    fields: Vec<Field>,
}

impl OutlierFilter {
    pub const DEFAULT_MULTIPLIER: f64 = 1.5;

    /// Filter over all nine numeric fields with the standard 1.5 multiplier.
    pub fn new() -> Self {
        Self {
            multiplier: Self::DEFAULT_MULTIPLIER,
            fields: Field::OUTLIER_FIELDS.to_vec(),
        }
    }

    /// Filter with a custom IQR multiplier (1.0 for stricter screening).
    pub fn with_multiplier(multiplier: f64) -> Result<Self> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(CarStatsError::InvalidMultiplier(multiplier));
        }
        Ok(Self {
            multiplier,
            ..Self::new()
        })
    }

    /// Restrict screening to a subset of fields.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Compute bounds for every screened field from this dataset.
    pub fn compute_bounds(&self, records: &[VehicleRecord]) -> Vec<FieldBounds> {
        self.fields
            .iter()
            .map(|&field| {
                let mut values: Vec<f64> =
                    records.iter().filter_map(|r| field.extract(r)).collect();
                values.sort_by(f64::total_cmp);

                let bounds = Bounds::from_sorted(&values, self.multiplier);
                log::debug!(
                    "{} bounds [{}, {}] from {} values",
                    field,
                    bounds.lower,
                    bounds.upper,
                    values.len()
                );

                FieldBounds {
                    field,
                    bounds,
                    sample_size: values.len(),
                }
            })
            .collect()
    }

    /// Whether a record passes every field's bounds.
    ///
    /// A null value never disqualifies a record on its own.
    pub fn retains(record: &VehicleRecord, bounds: &[FieldBounds]) -> bool {
        bounds.iter().all(|fb| match fb.field.extract(record) {
            Some(value) => fb.bounds.contains(value),
            None => true,
        })
    }

    /// Return the records that survive screening, in input order.
    pub fn filter(&self, records: &[VehicleRecord]) -> Vec<VehicleRecord> {
        self.filter_with_summary(records).0
    }

    /// Like [`filter`](Self::filter), also reporting bounds and rejection counts.
    pub fn filter_with_summary(
        &self,
        records: &[VehicleRecord],
    ) -> (Vec<VehicleRecord>, OutlierSummary) {
        let mut rejections_by_field: IndexMap<Field, usize> =
            self.fields.iter().map(|&f| (f, 0)).collect();

        if records.is_empty() {
            let summary = OutlierSummary {
                multiplier: self.multiplier,
                input_count: 0,
                retained_count: 0,
                removed_count: 0,
                bounds: Vec::new(),
                rejections_by_field,
            };
            return (Vec::new(), summary);
        }

        let bounds = self.compute_bounds(records);

        let mut retained = Vec::with_capacity(records.len());
        for record in records {
            let mut keep = true;
            for fb in &bounds {
                if let Some(value) = fb.field.extract(record) {
                    if !fb.bounds.contains(value) {
                        keep = false;
                        *rejections_by_field.entry(fb.field).or_insert(0) += 1;
                    }
                }
            }
            if keep {
                retained.push(record.clone());
            }
        }

        let summary = OutlierSummary {
            multiplier: self.multiplier,
            input_count: records.len(),
            retained_count: retained.len(),
            removed_count: records.len() - retained.len(),
            bounds,
            rejections_by_field,
        };

        log::debug!(
            "Outlier filter (x{}) kept {} of {} records",
            self.multiplier,
            summary.retained_count,
            summary.input_count
        );

        (retained, summary)
    }
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter `records` with the given IQR multiplier.
pub fn remove_outliers(records: &[VehicleRecord], multiplier: f64) -> Result<Vec<VehicleRecord>> {
    Ok(OutlierFilter::with_multiplier(multiplier)?.filter(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_city(values: &[f64]) -> Vec<VehicleRecord> {
        values
            .iter()
            .map(|&v| {
                let mut r = VehicleRecord::default();
                r.fuel.city_mpg = Some(v);
                r
            })
            .collect()
    }

    #[test]
    fn test_bounds_scenario() {
        // Q1 = 3, Q3 = 7, IQR = 4 → [3 - 6, 7 + 6]
        let bounds = Bounds::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 100.0], 1.5);
        assert_eq!(bounds, Bounds { lower: -3.0, upper: 13.0 });
    }

    #[test]
    fn test_bounds_empty_unbounded() {
        let bounds = Bounds::from_sorted(&[], 1.5);
        assert!(bounds.is_unbounded());
        assert!(bounds.contains(f64::MAX));
        assert!(bounds.contains(f64::MIN));
    }

    #[test]
    fn test_bounds_inclusive() {
        let bounds = Bounds { lower: -3.0, upper: 13.0 };
        assert!(bounds.contains(-3.0));
        assert!(bounds.contains(13.0));
        assert!(!bounds.contains(13.000001));
    }

    #[test]
    fn test_filter_removes_outlier() {
        let records = with_city(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 100.0]);
        let cleaned = OutlierFilter::new().filter(&records);

        assert_eq!(cleaned.len(), 7);
        assert!(cleaned.iter().all(|r| r.fuel.city_mpg != Some(100.0)));
    }

    #[test]
    fn test_filter_empty_input() {
        let (cleaned, summary) = OutlierFilter::new().filter_with_summary(&[]);
        assert!(cleaned.is_empty());
        assert!(summary.bounds.is_empty());
        assert_eq!(summary.input_count, 0);
    }

    #[test]
    fn test_null_value_is_exempt() {
        let mut records = with_city(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 100.0]);
        records.push(VehicleRecord::default());

        let cleaned = OutlierFilter::new().filter(&records);
        assert!(cleaned.contains(&VehicleRecord::default()));
    }

    #[test]
    fn test_null_record_excluded_by_other_field() {
        let mut records = with_city(&[10.0, 11.0, 12.0, 13.0]);
        for (i, r) in records.iter_mut().enumerate() {
            r.dimensions.height = Some(50.0 + i as f64);
        }
        let mut tall = VehicleRecord::default();
        tall.dimensions.height = Some(10_000.0);
        records.push(tall.clone());

        let cleaned = OutlierFilter::new().filter(&records);
        assert!(!cleaned.contains(&tall));
        assert_eq!(cleaned.len(), 4);
    }

    #[test]
    fn test_any_field_failure_excludes() {
        let mut records = with_city(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        for r in &mut records {
            r.engine.statistics.horsepower = Some(200.0);
        }
        records[2].engine.statistics.horsepower = Some(900.0);

        let (cleaned, summary) = OutlierFilter::new().filter_with_summary(&records);
        assert_eq!(cleaned.len(), 4);
        assert_eq!(summary.removed_count, 1);
        assert_eq!(summary.rejections_by_field[&Field::Horsepower], 1);
        assert_eq!(summary.rejections_by_field[&Field::CityMpg], 0);
    }

    #[test]
    fn test_field_without_values_is_unbounded() {
        let records = with_city(&[10.0, 11.0, 12.0]);
        let bounds = OutlierFilter::new().compute_bounds(&records);

        let torque = bounds.iter().find(|b| b.field == Field::Torque).unwrap();
        assert!(torque.bounds.is_unbounded());
        assert_eq!(torque.sample_size, 0);
    }

    #[test]
    fn test_invalid_multiplier() {
        assert!(matches!(
            OutlierFilter::with_multiplier(0.0),
            Err(CarStatsError::InvalidMultiplier(_))
        ));
        assert!(OutlierFilter::with_multiplier(-1.0).is_err());
        assert!(OutlierFilter::with_multiplier(f64::NAN).is_err());
        assert!(OutlierFilter::with_multiplier(0.8).is_ok());
    }

    #[test]
    fn test_stricter_multiplier_removes_more() {
        let records = with_city(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 11.5]);
        // m = 1.5 → upper 13, keeps 11.5; m = 1.0 → upper 11, drops it
        assert_eq!(remove_outliers(&records, 1.5).unwrap().len(), 8);
        assert_eq!(remove_outliers(&records, 1.0).unwrap().len(), 7);
    }

    #[test]
    fn test_with_fields_restricts_screening() {
        let mut records = with_city(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        records[0].engine.statistics.torque = Some(1.0);
        for r in records.iter_mut().skip(1) {
            r.engine.statistics.torque = Some(300.0);
        }

        let filter = OutlierFilter::new().with_fields([Field::CityMpg]);
        assert_eq!(filter.filter(&records).len(), 5);
    }
}
