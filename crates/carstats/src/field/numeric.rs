//! Numeric field accessor table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{CarStatsError, Result};
use crate::record::VehicleRecord;

/// Static description of one numeric field: its names and how to read it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Logical key, e.g. `city_mpg`.
    pub key: &'static str,
    /// Selector key used by dashboards, e.g. `cityMpg`.
    pub selector: &'static str,
    /// Dotted path in the dataset schema.
    pub path: &'static str,
    /// Display title.
    pub title: &'static str,
    extract: fn(&VehicleRecord) -> Option<f64>,
}

impl FieldSpec {
    /// Last segment of the dataset path, e.g. `City mpg`.
    pub fn leaf(&self) -> &'static str {
        self.path.rsplit('.').next().unwrap_or(self.path)
    }
}

/// A numeric field of a vehicle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Height,
    Length,
    Width,
    ForwardGears,
    Horsepower,
    Torque,
    CityMpg,
    HighwayMpg,
    Year,
}

// Indexed by `Field as usize`; order must match the enum.
static FIELD_TABLE: [FieldSpec; 9] = [
    FieldSpec {
        key: "height",
        selector: "height",
        path: "Dimensions.Height",
        title: "Height",
        extract: |r| r.dimensions.height,
    },
    FieldSpec {
        key: "length",
        selector: "length",
        path: "Dimensions.Length",
        title: "Length",
        extract: |r| r.dimensions.length,
    },
    FieldSpec {
        key: "width",
        selector: "width",
        path: "Dimensions.Width",
        title: "Width",
        extract: |r| r.dimensions.width,
    },
    FieldSpec {
        key: "forward_gears",
        selector: "forwardGears",
        path: "Engine Information.Number of Forward Gears",
        title: "Forward Gears",
        extract: |r| r.engine.forward_gears,
    },
    FieldSpec {
        key: "horsepower",
        selector: "horsepower",
        path: "Engine Information.Engine Statistics.Horsepower",
        title: "Horsepower",
        extract: |r| r.engine.statistics.horsepower,
    },
    FieldSpec {
        key: "torque",
        selector: "torque",
        path: "Engine Information.Engine Statistics.Torque",
        title: "Torque (ft-lbs)",
        extract: |r| r.engine.statistics.torque,
    },
    FieldSpec {
        key: "city_mpg",
        selector: "cityMpg",
        path: "Fuel Information.City mpg",
        title: "City MPG",
        extract: |r| r.fuel.city_mpg,
    },
    FieldSpec {
        key: "highway_mpg",
        selector: "highwayMpg",
        path: "Fuel Information.Highway mpg",
        title: "Highway MPG",
        extract: |r| r.fuel.highway_mpg,
    },
    FieldSpec {
        key: "year",
        selector: "year",
        path: "Identification.Year",
        title: "Year",
        extract: |r| r.identification.year,
    },
];

static FIELD_LOOKUP: Lazy<HashMap<String, Field>> = Lazy::new(|| {
    let mut lookup = HashMap::new();
    for field in Field::ALL {
        let spec = field.spec();
        for name in [spec.key, spec.selector, spec.path, spec.leaf(), spec.title] {
            lookup.insert(normalize(name), field);
        }
    }
    lookup
});

pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Field {
    /// Every numeric field, in table order.
    pub const ALL: [Field; 9] = [
        Field::Height,
        Field::Length,
        Field::Width,
        Field::ForwardGears,
        Field::Horsepower,
        Field::Torque,
        Field::CityMpg,
        Field::HighwayMpg,
        Field::Year,
    ];

    /// Fields screened by the outlier filter.
    pub const OUTLIER_FIELDS: [Field; 9] = Field::ALL;

    /// Fuel-economy fields offered as the first correlation operand.
    pub const FUEL_METRICS: [Field; 2] = [Field::CityMpg, Field::HighwayMpg];

    /// Engine fields offered as the second correlation operand.
    pub const ENGINE_METRICS: [Field; 2] = [Field::Torque, Field::Horsepower];

    /// Fields offered as ranking metrics.
    pub const RANK_METRICS: [Field; 4] = [
        Field::CityMpg,
        Field::HighwayMpg,
        Field::Torque,
        Field::Horsepower,
    ];

    /// Resolve a field from any of its accepted spellings.
    ///
    /// Matching is case-insensitive against the logical key, the selector
    /// key, the dataset path, the path leaf and the display title.
    pub fn resolve(name: &str) -> Result<Field> {
        FIELD_LOOKUP
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| CarStatsError::UnknownField(name.to_string()))
    }

    /// Static description of this field.
    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_TABLE[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn title(self) -> &'static str {
        self.spec().title
    }

    pub fn path(self) -> &'static str {
        self.spec().path
    }

    /// Read this field from a record.
    ///
    /// Returns `None` when the value is missing or not a finite number, so
    /// callers can tell "absent" apart from zero.
    pub fn extract(self, record: &VehicleRecord) -> Option<f64> {
        (self.spec().extract)(record).filter(|v| v.is_finite())
    }
}

impl FromStr for Field {
    type Err = CarStatsError;

    fn from_str(s: &str) -> Result<Self> {
        Field::resolve(s)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for field in Field::ALL {
            let spec = field.spec();
            assert_eq!(Field::resolve(spec.key).unwrap(), field);
        }
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(Field::resolve("city_mpg").unwrap(), Field::CityMpg);
        assert_eq!(Field::resolve("cityMpg").unwrap(), Field::CityMpg);
        assert_eq!(Field::resolve("City mpg").unwrap(), Field::CityMpg);
        assert_eq!(Field::resolve("Fuel Information.City mpg").unwrap(), Field::CityMpg);
        assert_eq!(Field::resolve("  TORQUE ").unwrap(), Field::Torque);
        assert_eq!(
            Field::resolve("Number of Forward Gears").unwrap(),
            Field::ForwardGears
        );
    }

    #[test]
    fn test_unknown_field_is_configuration_error() {
        let err = Field::resolve("top_speed").unwrap_err();
        assert!(matches!(err, CarStatsError::UnknownField(ref n) if n == "top_speed"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_extract_distinguishes_absent_from_zero() {
        let mut record = VehicleRecord::default();
        assert_eq!(Field::HighwayMpg.extract(&record), None);

        record.fuel.highway_mpg = Some(0.0);
        assert_eq!(Field::HighwayMpg.extract(&record), Some(0.0));
    }

    #[test]
    fn test_extract_every_field() {
        let mut record = VehicleRecord::default();
        record.dimensions.height = Some(1.0);
        record.dimensions.length = Some(2.0);
        record.dimensions.width = Some(3.0);
        record.engine.forward_gears = Some(4.0);
        record.engine.statistics.horsepower = Some(5.0);
        record.engine.statistics.torque = Some(6.0);
        record.fuel.city_mpg = Some(7.0);
        record.fuel.highway_mpg = Some(8.0);
        record.identification.year = Some(9.0);

        let values: Vec<f64> = Field::ALL
            .iter()
            .filter_map(|f| f.extract(&record))
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_serde_uses_logical_key() {
        assert_eq!(serde_json::to_string(&Field::CityMpg).unwrap(), "\"city_mpg\"");
        assert_eq!(Field::CityMpg.to_string(), "city_mpg");
    }
}
