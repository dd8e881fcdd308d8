//! Per-year fuel-economy averages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::stats::mean;
use crate::field::Field;
use crate::record::VehicleRecord;

/// Averages for one model year.
///
/// `city` or `highway` is NaN when the year had no numeric value for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatePoint {
    pub year: i32,
    pub city: f64,
    pub highway: f64,
    pub combined: f64,
}

#[derive(Default)]
struct YearBucket {
    city: Vec<f64>,
    highway: Vec<f64>,
}

/// Group records by year and average city, highway and combined mpg.
///
/// Output is ascending by year with one point per year that had at least one
/// numeric city or highway value.
pub fn aggregate_by_year(records: &[VehicleRecord]) -> Vec<AggregatePoint> {
    let mut buckets: BTreeMap<i32, YearBucket> = BTreeMap::new();
    let mut without_year = 0usize;

    for record in records {
        let Some(year) = record.year() else {
            without_year += 1;
            continue;
        };
        let bucket = buckets.entry(year).or_default();
        if let Some(city) = Field::CityMpg.extract(record) {
            bucket.city.push(city);
        }
        if let Some(highway) = Field::HighwayMpg.extract(record) {
            bucket.highway.push(highway);
        }
    }

    if without_year > 0 {
        log::debug!("Skipped {} records without a usable year", without_year);
    }

    buckets
        .into_iter()
        .filter(|(_, b)| !b.city.is_empty() || !b.highway.is_empty())
        .map(|(year, b)| AggregatePoint {
            year,
            city: mean(&b.city),
            highway: mean(&b.highway),
            combined: combined_mpg(&b.city, &b.highway),
        })
        .collect()
}

/// Combined mpg for one year.
///
/// City and highway values are paired by position in their own sequences,
/// not by record. Pairs whose highway value is missing or zero are dropped,
/// so a highway reading of exactly 0 counts as missing here even though it
/// is averaged normally into the highway figure. Zero results are dropped
/// too. Returns 0.0 when nothing remains.
pub fn combined_mpg(city: &[f64], highway: &[f64]) -> f64 {
    if city.is_empty() || highway.is_empty() {
        return 0.0;
    }

    let combined: Vec<f64> = city
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| match highway.get(i) {
            Some(&h) if h != 0.0 => Some((c + h) / 2.0),
            _ => None,
        })
        .filter(|&v| v != 0.0)
        .collect();

    if combined.is_empty() {
        0.0
    } else {
        mean(&combined)
    }
}
