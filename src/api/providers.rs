//! Capability traits for the external collaborators of the engine.
//!
//! Each trait is object-safe so the engine can hold `Arc<dyn ...>` and swap
//! real clients for the offline provider or test doubles.

use crate::error::Result;
use crate::models::{CurrentWeather, Location, Pollutant, SensorId, SensorReading, Station};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Forward and reverse geocoding.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Looks up a free-text place name, optionally restricted to a country/region code.
    async fn search(&self, text: &str, region_hint: Option<&str>) -> Result<Vec<Location>>;

    /// Finds human-readable locations for a coordinate pair.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Location>>;
}

/// Current ambient weather at a point.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather>;
}

/// A provider that returns exactly one concentration (µg/m³) per pollutant at a point.
#[async_trait]
pub trait PollutionProvider: Send + Sync {
    async fn current_pollution(&self, latitude: f64, longitude: f64) -> Result<BTreeMap<Pollutant, f64>>;
}

/// Lists monitoring stations near a location.
#[async_trait]
pub trait StationProvider: Send + Sync {
    async fn stations_near(&self, location: &Location) -> Result<Vec<Station>>;
}

/// Queries a single sensor for its most recent value.
#[async_trait]
pub trait SensorProvider: Send + Sync {
    /// `Ok(None)` when the sensor has no current value.
    async fn latest_reading(&self, sensor_id: SensorId) -> Result<Option<SensorReading>>;
}
