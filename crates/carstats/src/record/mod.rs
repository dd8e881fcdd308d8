//! Vehicle record types.

pub(crate) mod de;
mod vehicle;

pub use vehicle::{
    Dimensions, EngineInformation, EngineStatistics, FuelInformation, Identification,
    VehicleRecord,
};
