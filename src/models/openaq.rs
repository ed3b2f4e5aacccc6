//! Deserialization structs for the subset of the OpenAQ v3 API used by the station-network path.
//!
//! Includes structs for:
//! - `/v3/locations` (candidate stations and their sensors).
//! - `/v3/sensors/{id}` (sensor detail including its latest value).

use super::{Pollutant, SensorReading, Station, StationSensor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Generic metadata for V3 API responses.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MetaV3 {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Represents geographical coordinates.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoordinatesV3 {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Represents date and time with UTC and local variants.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatetimeObject {
    pub utc: DateTime<Utc>,
    pub local: String, // Keep as string as timezone info might vary
}

/// Base representation of a parameter.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterBase {
    pub id: i32,
    pub name: String,
    pub units: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Base representation of a sensor as listed on a location.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorBase {
    pub id: i64,
    pub name: String,
    pub parameter: ParameterBase,
}

/// Response structure for the `/v3/locations` endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub meta: MetaV3,
    pub results: Vec<OpenAqLocation>,
}

/// A single monitoring location from the `/v3/locations` endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAqLocation {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub sensors: Vec<SensorBase>,
    #[serde(default)]
    pub coordinates: Option<CoordinatesV3>,
    #[serde(default)]
    pub distance: Option<f64>, // Included when searching by coordinates
}

impl OpenAqLocation {
    /// Converts the location into a [`Station`], keeping only sensors for scored pollutants.
    pub fn into_station(self) -> Station {
        let name = self
            .name
            .or(self.locality)
            .unwrap_or_else(|| format!("Station {}", self.id));

        let sensors = self.sensors.into_iter().filter_map(|s| {
            match s.parameter.name.parse::<Pollutant>() {
                Ok(pollutant) => Some(StationSensor {
                    id: s.id,
                    pollutant,
                }),
                Err(_) => {
                    debug!(
                        "Ignoring sensor {} with unscored parameter '{}'",
                        s.id, s.parameter.name
                    );
                    None
                },
            }
        });

        Station::new(self.id, name, sensors)
    }
}

/// The latest value block attached to a sensor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LatestValue {
    #[serde(default)]
    pub datetime: Option<DatetimeObject>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Sensor detail from the `/v3/sensors/{id}` endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorDetail {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latest: Option<LatestValue>,
}

impl SensorDetail {
    /// The latest reading, or `None` when the sensor reports no value.
    pub fn latest_reading(&self) -> Option<SensorReading> {
        let latest = self.latest.as_ref()?;
        Some(SensorReading {
            value: latest.value?,
            timestamp: latest.datetime.as_ref().map(|d| d.utc),
        })
    }
}

/// Response structure for the `/v3/sensors/{id}` endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorsResponse {
    #[serde(default)]
    pub meta: MetaV3,
    pub results: Vec<SensorDetail>,
}
