//! Categorical attribute accessors used by filters and option lists.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::numeric::normalize;
use crate::error::{CarStatsError, Result};
use crate::record::VehicleRecord;

/// A string-valued attribute of a vehicle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Driveline,
    Transmission,
    EngineType,
    FuelType,
    Make,
    Classification,
}

static CATEGORY_LOOKUP: Lazy<HashMap<String, Category>> = Lazy::new(|| {
    let mut lookup = HashMap::new();
    for category in Category::ALL {
        let leaf = category.path().rsplit('.').next().unwrap_or_default();
        for name in [category.key(), category.path(), leaf] {
            lookup.insert(normalize(name), category);
        }
    }
    lookup
});

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Driveline,
        Category::Transmission,
        Category::EngineType,
        Category::FuelType,
        Category::Make,
        Category::Classification,
    ];

    /// Resolve a category from its key, dataset path or path leaf.
    pub fn resolve(name: &str) -> Result<Category> {
        CATEGORY_LOOKUP
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| CarStatsError::UnknownCategory(name.to_string()))
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Driveline => "driveline",
            Category::Transmission => "transmission",
            Category::EngineType => "engine_type",
            Category::FuelType => "fuel_type",
            Category::Make => "make",
            Category::Classification => "classification",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Category::Driveline => "Engine Information.Driveline",
            Category::Transmission => "Engine Information.Transmission",
            Category::EngineType => "Engine Information.Engine Type",
            Category::FuelType => "Fuel Information.Fuel Type",
            Category::Make => "Identification.Make",
            Category::Classification => "Identification.Classification",
        }
    }

    /// Read this attribute from a record.
    pub fn extract(self, record: &VehicleRecord) -> Option<&str> {
        let value = match self {
            Category::Driveline => &record.engine.driveline,
            Category::Transmission => &record.engine.transmission,
            Category::EngineType => &record.engine.engine_type,
            Category::FuelType => &record.fuel.fuel_type,
            Category::Make => &record.identification.make,
            Category::Classification => &record.identification.classification,
        };
        value.as_deref()
    }

    /// Distinct values of this attribute in first-seen order.
    ///
    /// Records without a value for the attribute are skipped.
    pub fn distinct_values(self, records: &[VehicleRecord]) -> Vec<String> {
        let values: IndexSet<&str> = records.iter().filter_map(|r| self.extract(r)).collect();
        values.into_iter().map(str::to_string).collect()
    }
}

impl FromStr for Category {
    type Err = CarStatsError;

    fn from_str(s: &str) -> Result<Self> {
        Category::resolve(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
