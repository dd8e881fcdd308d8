//! Property-based tests for the CarStats transforms.
//!
//! These tests use proptest to generate random datasets and verify that the
//! analysis components keep their invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p carstats --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p carstats --test property_tests
//! ```

use std::collections::BTreeSet;

use proptest::prelude::*;

use carstats::{
    aggregate_by_year, correlate, rank, Category, Field, OutlierFilter, RankFilter, VehicleRecord,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// A numeric slot that is missing about a fifth of the time.
fn maybe_value(range: std::ops::Range<u32>) -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        4 => range.prop_map(|v| Some(v as f64)),
    ]
}

fn driveline() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("All-wheel drive".to_string())),
        Just(Some("Front-wheel drive".to_string())),
        Just(Some("Rear-wheel drive".to_string())),
    ]
}

/// Generate a vehicle with realistic magnitudes and occasional gaps.
fn vehicle() -> impl Strategy<Value = VehicleRecord> {
    (
        (maybe_value(50..260), maybe_value(50..260), maybe_value(50..260)),
        (maybe_value(1..10), maybe_value(70..700), maybe_value(70..700)),
        (maybe_value(0..60), maybe_value(0..60), maybe_value(2008..2013)),
        driveline(),
    )
        .prop_map(
            |((height, length, width), (gears, hp, torque), (city, highway, year), drive)| {
                let mut r = VehicleRecord::default();
                r.dimensions.height = height;
                r.dimensions.length = length;
                r.dimensions.width = width;
                r.engine.forward_gears = gears;
                r.engine.statistics.horsepower = hp;
                r.engine.statistics.torque = torque;
                r.fuel.city_mpg = city;
                r.fuel.highway_mpg = highway;
                r.identification.year = year;
                r.engine.driveline = drive;
                r
            },
        )
}

fn dataset() -> impl Strategy<Value = Vec<VehicleRecord>> {
    prop::collection::vec(vehicle(), 0..60)
}

/// Like [`dataset`], but some city values are NaN or infinite.
fn dataset_with_non_finite() -> impl Strategy<Value = Vec<VehicleRecord>> {
    let non_finite = prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)];
    prop::collection::vec((vehicle(), prop::option::of(non_finite)), 0..60).prop_map(|rows| {
        rows.into_iter()
            .map(|(mut r, bad_city)| {
                if bad_city.is_some() {
                    r.fuel.city_mpg = bad_city;
                }
                r
            })
            .collect()
    })
}

fn multiplier() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.8), Just(1.0), Just(1.5), Just(3.0)]
}

fn any_field() -> impl Strategy<Value = Field> {
    prop::sample::select(Field::ALL.to_vec())
}

// =============================================================================
// Outlier Filter Properties
// =============================================================================

mod outlier_tests {
    use super::*;

    proptest! {
        /// Output is a subsequence of the input: nothing new, order kept.
        #[test]
        fn output_is_ordered_subset(records in dataset(), m in multiplier()) {
            let cleaned = OutlierFilter::with_multiplier(m).unwrap().filter(&records);

            let mut remaining = records.iter();
            for kept in &cleaned {
                prop_assert!(remaining.any(|r| r == kept));
            }
        }

        /// Same input, same output.
        #[test]
        fn filter_is_deterministic(records in dataset(), m in multiplier()) {
            let filter = OutlierFilter::with_multiplier(m).unwrap();
            prop_assert_eq!(filter.filter(&records), filter.filter(&records));
        }

        /// Bounds are ordered when values exist and unbounded otherwise.
        #[test]
        fn bounds_are_ordered(records in dataset(), m in multiplier()) {
            let bounds = OutlierFilter::with_multiplier(m).unwrap().compute_bounds(&records);

            prop_assert_eq!(bounds.len(), Field::OUTLIER_FIELDS.len());
            for fb in bounds {
                if fb.sample_size == 0 {
                    prop_assert!(fb.bounds.is_unbounded());
                } else {
                    prop_assert!(fb.bounds.lower <= fb.bounds.upper);
                }
            }
        }

        /// Every kept record passes the bounds, every dropped one fails them.
        #[test]
        fn retained_iff_within_bounds(records in dataset()) {
            let filter = OutlierFilter::new();
            let bounds = filter.compute_bounds(&records);
            let cleaned = filter.filter(&records);

            let expected: Vec<&VehicleRecord> = records
                .iter()
                .filter(|r| OutlierFilter::retains(r, &bounds))
                .collect();
            let actual: Vec<&VehicleRecord> = cleaned.iter().collect();
            prop_assert_eq!(expected, actual);
        }

        /// Summary counts add up.
        #[test]
        fn summary_counts_add_up(records in dataset()) {
            let (cleaned, summary) = OutlierFilter::new().filter_with_summary(&records);
            prop_assert_eq!(summary.input_count, records.len());
            prop_assert_eq!(summary.retained_count, cleaned.len());
            prop_assert_eq!(summary.retained_count + summary.removed_count, records.len());
        }
    }
}

// =============================================================================
// Correlation Properties
// =============================================================================

mod correlation_tests {
    use super::*;

    proptest! {
        /// corr(A, B) == corr(B, A).
        #[test]
        fn correlation_is_symmetric(records in dataset(), a in any_field(), b in any_field()) {
            let ab = correlate(&records, a, b).value;
            let ba = correlate(&records, b, a).value;
            prop_assert!(ab == ba || (ab.is_nan() && ba.is_nan()));
        }

        /// Defined values stay in [-1, 1].
        #[test]
        fn correlation_is_bounded(records in dataset(), a in any_field(), b in any_field()) {
            let c = correlate(&records, a, b);
            if c.is_defined() {
                prop_assert!((-1.0..=1.0).contains(&c.value));
            }
        }

        /// Fewer than two pairs is always undefined.
        #[test]
        fn too_few_pairs_is_undefined(records in prop::collection::vec(vehicle(), 0..2)) {
            prop_assert!(!correlate(&records, Field::CityMpg, Field::Torque).is_defined());
        }
    }
}

// =============================================================================
// Temporal Aggregation Properties
// =============================================================================

mod temporal_tests {
    use super::*;

    proptest! {
        /// Years are unique and strictly ascending.
        #[test]
        fn years_strictly_ascending(records in dataset()) {
            let points = aggregate_by_year(&records);
            prop_assert!(points.windows(2).all(|w| w[0].year < w[1].year));
        }

        /// Combined mpg is always a finite number, even with non-finite inputs.
        #[test]
        fn combined_is_always_finite(records in dataset_with_non_finite()) {
            for point in aggregate_by_year(&records) {
                prop_assert!(point.combined.is_finite());
            }
        }

        /// Every year with a numeric city or highway value appears exactly once.
        #[test]
        fn every_year_with_values_appears(records in dataset_with_non_finite()) {
            let expected: BTreeSet<i32> = records
                .iter()
                .filter(|r| {
                    Field::CityMpg.extract(r).is_some() || Field::HighwayMpg.extract(r).is_some()
                })
                .filter_map(|r| r.year())
                .collect();
            let actual: Vec<i32> = aggregate_by_year(&records).iter().map(|p| p.year).collect();
            prop_assert_eq!(expected.into_iter().collect::<Vec<_>>(), actual);
        }
    }
}

// =============================================================================
// Rank Grouper Properties
// =============================================================================

mod rank_tests {
    use super::*;

    proptest! {
        /// At most `limit` groups, strictly descending, members match value.
        #[test]
        fn groups_are_bounded_sorted_and_exact(
            records in dataset(),
            metric in prop::sample::select(Field::RANK_METRICS.to_vec()),
            limit in 0usize..15,
        ) {
            let groups = rank(&records, &RankFilter::new(), metric, limit);

            prop_assert!(groups.len() <= limit);
            prop_assert!(groups.windows(2).all(|w| w[0].value > w[1].value));
            for (i, group) in groups.iter().enumerate() {
                prop_assert_eq!(group.rank, i + 1);
                prop_assert!(!group.members.is_empty());
                for member in &group.members {
                    prop_assert_eq!(metric.extract(member), Some(group.value));
                }
            }
        }

        /// With a large limit, no record with the metric is lost.
        #[test]
        fn large_limit_keeps_every_record(records in dataset()) {
            let groups = rank(&records, &RankFilter::new(), Field::CityMpg, usize::MAX);
            let grouped: usize = groups.iter().map(|g| g.members.len()).sum();
            let with_metric = records.iter().filter(|r| r.fuel.city_mpg.is_some()).count();
            prop_assert_eq!(grouped, with_metric);
        }

        /// Filtered rankings only contain matching records.
        #[test]
        fn filter_is_respected(records in dataset()) {
            let filter = RankFilter::new().driveline("Front-wheel drive");
            for group in rank(&records, &filter, Field::HighwayMpg, 10) {
                for member in &group.members {
                    prop_assert_eq!(
                        Category::Driveline.extract(member),
                        Some("Front-wheel drive")
                    );
                }
            }
        }
    }
}
