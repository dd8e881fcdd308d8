//! Nested vehicle record matching the dataset schema.

use serde::{Deserialize, Serialize};

use super::de;

/// Exterior dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(rename = "Height", default, deserialize_with = "de::lenient_f64")]
    pub height: Option<f64>,
    #[serde(rename = "Length", default, deserialize_with = "de::lenient_f64")]
    pub length: Option<f64>,
    #[serde(rename = "Width", default, deserialize_with = "de::lenient_f64")]
    pub width: Option<f64>,
}

/// Power figures nested under the engine section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineStatistics {
    #[serde(rename = "Horsepower", default, deserialize_with = "de::lenient_f64")]
    pub horsepower: Option<f64>,
    #[serde(rename = "Torque", default, deserialize_with = "de::lenient_f64")]
    pub torque: Option<f64>,
}

/// Drivetrain and engine attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineInformation {
    #[serde(rename = "Driveline", default, deserialize_with = "de::lenient_string")]
    pub driveline: Option<String>,
    #[serde(rename = "Engine Type", default, deserialize_with = "de::lenient_string")]
    pub engine_type: Option<String>,
    #[serde(rename = "Hybrid", default, deserialize_with = "de::lenient_bool")]
    pub hybrid: Option<bool>,
    #[serde(
        rename = "Number of Forward Gears",
        default,
        deserialize_with = "de::lenient_f64"
    )]
    pub forward_gears: Option<f64>,
    #[serde(rename = "Transmission", default, deserialize_with = "de::lenient_string")]
    pub transmission: Option<String>,
    #[serde(rename = "Engine Statistics", default)]
    pub statistics: EngineStatistics,
}

/// Fuel economy and fuel type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelInformation {
    #[serde(rename = "City mpg", default, deserialize_with = "de::lenient_f64")]
    pub city_mpg: Option<f64>,
    #[serde(rename = "Fuel Type", default, deserialize_with = "de::lenient_string")]
    pub fuel_type: Option<String>,
    #[serde(rename = "Highway mpg", default, deserialize_with = "de::lenient_f64")]
    pub highway_mpg: Option<f64>,
}

/// Identity of the vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    #[serde(rename = "Classification", default, deserialize_with = "de::lenient_string")]
    pub classification: Option<String>,
    #[serde(rename = "ID", default, deserialize_with = "de::lenient_string")]
    pub id: Option<String>,
    #[serde(rename = "Make", default, deserialize_with = "de::lenient_string")]
    pub make: Option<String>,
    #[serde(rename = "Model Year", default, deserialize_with = "de::lenient_string")]
    pub model_year: Option<String>,
    #[serde(rename = "Year", default, deserialize_with = "de::lenient_f64")]
    pub year: Option<f64>,
}

/// A single vehicle entry.
///
/// Records are read-only inputs: every analysis step returns new collections
/// and never mutates the records it was given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "Dimensions", default)]
    pub dimensions: Dimensions,
    #[serde(rename = "Engine Information", default)]
    pub engine: EngineInformation,
    #[serde(rename = "Fuel Information", default)]
    pub fuel: FuelInformation,
    #[serde(rename = "Identification", default)]
    pub identification: Identification,
}

impl VehicleRecord {
    /// Display identifier, falling back to an empty string.
    pub fn id(&self) -> &str {
        self.identification.id.as_deref().unwrap_or_default()
    }

    /// Model year as an integer bucket key.
    ///
    /// Returns `None` when the year is absent or not a whole number.
    pub fn year(&self) -> Option<i32> {
        let year = self.identification.year?;
        if year.fract() != 0.0 || year < i32::MIN as f64 || year > i32::MAX as f64 {
            return None;
        }
        Some(year as i32)
    }

    /// Human-readable size string, e.g. `"143L × 202W × 140H"`.
    pub fn size_label(&self) -> String {
        fn part(v: Option<f64>) -> String {
            v.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
        }
        format!(
            "{}L × {}W × {}H",
            part(self.dimensions.length),
            part(self.dimensions.width),
            part(self.dimensions.height)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUDI: &str = r#"{
        "Dimensions": {"Height": 140, "Length": 143, "Width": 202},
        "Engine Information": {
            "Driveline": "All-wheel drive",
            "Engine Type": "Audi 3.2L 6 cylinder 250hp 236ft-lbs",
            "Hybrid": false,
            "Number of Forward Gears": 6,
            "Transmission": "6 Speed Automatic Select Shift",
            "Engine Statistics": {"Horsepower": 250, "Torque": 236}
        },
        "Fuel Information": {"City mpg": 18, "Fuel Type": "Gasoline", "Highway mpg": 25},
        "Identification": {
            "Classification": "Automatic transmission",
            "ID": "2009 Audi A3 3.2",
            "Make": "Audi",
            "Model Year": "2009 Audi A3",
            "Year": 2009
        }
    }"#;

    #[test]
    fn test_deserialize_full_record() {
        let record: VehicleRecord = serde_json::from_str(AUDI).unwrap();

        assert_eq!(record.dimensions.height, Some(140.0));
        assert_eq!(record.engine.statistics.horsepower, Some(250.0));
        assert_eq!(record.engine.driveline.as_deref(), Some("All-wheel drive"));
        assert_eq!(record.fuel.city_mpg, Some(18.0));
        assert_eq!(record.id(), "2009 Audi A3 3.2");
        assert_eq!(record.year(), Some(2009));
    }

    #[test]
    fn test_non_numeric_values_become_none() {
        let json = r#"{
            "Dimensions": {"Height": "tall", "Length": null, "Width": true},
            "Fuel Information": {"City mpg": [1, 2], "Highway mpg": {"a": 1}},
            "Identification": {"ID": 42, "Year": "2010"}
        }"#;
        let record: VehicleRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.dimensions.height, None);
        assert_eq!(record.dimensions.length, None);
        assert_eq!(record.dimensions.width, None);
        assert_eq!(record.fuel.city_mpg, None);
        assert_eq!(record.fuel.highway_mpg, None);
        assert_eq!(record.identification.id, None);
        assert_eq!(record.year(), None);
    }

    #[test]
    fn test_missing_sections_default() {
        let record: VehicleRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, VehicleRecord::default());
        assert_eq!(record.id(), "");
    }

    #[test]
    fn test_fractional_year_is_not_a_bucket() {
        let mut record = VehicleRecord::default();
        record.identification.year = Some(2009.5);
        assert_eq!(record.year(), None);
    }

    #[test]
    fn test_size_label() {
        let record: VehicleRecord = serde_json::from_str(AUDI).unwrap();
        assert_eq!(record.size_label(), "143L × 202W × 140H");
    }
}
