// Dataset profiles
// Column layouts and detection defaults for the supported seismometer
// datasets

use serde::{Deserialize, Serialize};

use crate::events::DetectorConfig;

/// Supported seismometer datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetVariant {
    /// Mars InSight lander exports
    Mars,

    /// Apollo lunar seismometer exports
    Lunar,
}

impl DatasetVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetVariant::Mars => "mars",
            DatasetVariant::Lunar => "lunar",
        }
    }
}

/// How the events CSV treats an existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventsCsvMode {
    /// Keep existing rows and append, writing the header only once
    Append,

    /// Replace the file, always writing the header
    Overwrite,
}

/// Column layout and output conventions for one dataset variant
#[derive(Debug, Clone)]
pub struct DatasetProfile {
    pub variant: DatasetVariant,

    /// Header name of the relative-time column
    pub time_column: String,

    /// Header name of the velocity column
    pub velocity_column: String,

    /// File the catalog lines for this variant accumulate in
    pub catalog_file: String,

    /// Canonical neighbor radius for the variant, in seconds
    pub radius: f64,

    /// Events CSV write mode for the variant
    pub events_csv_mode: EventsCsvMode,
}

impl DatasetProfile {
    /// Detection defaults for this variant
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            radius: self.radius,
            ..DetectorConfig::default()
        }
    }
}

/// The Mars InSight profile
pub fn mars() -> DatasetProfile {
    DatasetProfile {
        variant: DatasetVariant::Mars,
        time_column: "rel_time(sec)".to_string(),
        velocity_column: "velocity(c/s)".to_string(),
        catalog_file: "marsCatalog.csv".to_string(),
        radius: 1.0,
        events_csv_mode: EventsCsvMode::Append,
    }
}

/// The Apollo lunar profile
/// Lunar exports span hours of relative time, hence the wider radius
pub fn lunar() -> DatasetProfile {
    DatasetProfile {
        variant: DatasetVariant::Lunar,
        time_column: "time_rel(sec)".to_string(),
        velocity_column: "velocity(m/s)".to_string(),
        catalog_file: "lunarCatalog.csv".to_string(),
        radius: 200.0,
        events_csv_mode: EventsCsvMode::Overwrite,
    }
}

/// Get a profile by dataset name
pub fn get_profile(name: &str) -> Option<DatasetProfile> {
    match name.to_lowercase().as_str() {
        "mars" => Some(mars()),
        "lunar" => Some(lunar()),
        _ => None,
    }
}

/// All profiles in registration order
pub fn list_profiles() -> Vec<DatasetProfile> {
    vec![mars(), lunar()]
}
