//! Monitoring stations as exposed by station-network providers.

use super::Pollutant;
use chrono::{DateTime, Utc};

/// Provider-specific identifier of a single sensor.
pub type SensorId = i64;

/// One pollutant sensor mounted on a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationSensor {
    pub id: SensorId,
    pub pollutant: Pollutant,
}

/// A physical monitoring point. Lives only for the duration of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: i64,
    pub name: String,
    sensors: Vec<StationSensor>,
}

impl Station {
    /// Builds a station keeping at most one sensor per pollutant (first one wins).
    pub fn new(id: i64, name: impl Into<String>, sensors: impl IntoIterator<Item = StationSensor>) -> Self {
        let mut unique: Vec<StationSensor> = Vec::new();
        for sensor in sensors {
            if !unique.iter().any(|s| s.pollutant == sensor.pollutant) {
                unique.push(sensor);
            }
        }
        Self {
            id,
            name: name.into(),
            sensors: unique,
        }
    }

    pub fn sensors(&self) -> &[StationSensor] {
        &self.sensors
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }
}

/// The most recent value reported by a sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub value: f64,
    pub timestamp: Option<DateTime<Utc>>,
}
