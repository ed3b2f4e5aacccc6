//! Deserialization structs for the OpenWeatherMap geocoding, weather and air pollution APIs.

use super::{CurrentWeather, Pollutant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of `/geo/1.0/direct` or `/geo/1.0/reverse`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeoResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MainBlock {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindBlock {
    pub speed: f64,
}

/// Response of `/data/2.5/weather` with `units=metric`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherResponse {
    pub main: MainBlock,
    #[serde(default)]
    pub wind: Option<WindBlock>,
}

impl WeatherResponse {
    pub fn into_current(self) -> CurrentWeather {
        CurrentWeather {
            temperature_c: self.main.temp,
            humidity_percent: self.main.humidity,
            wind_speed_mps: self.wind.map(|w| w.speed).unwrap_or(0.0),
        }
    }
}

/// Pollutant concentrations in µg/m³ as reported by `/data/2.5/air_pollution`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Components {
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default)]
    pub no2: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
    #[serde(default)]
    pub co: Option<f64>,
    #[serde(default)]
    pub so2: Option<f64>,
}

impl Components {
    /// Reported concentrations keyed by pollutant. Absent components are omitted.
    pub fn concentrations(&self) -> BTreeMap<Pollutant, f64> {
        [
            (Pollutant::Pm25, self.pm2_5),
            (Pollutant::Pm10, self.pm10),
            (Pollutant::No2, self.no2),
            (Pollutant::O3, self.o3),
            (Pollutant::Co, self.co),
            (Pollutant::So2, self.so2),
        ]
        .into_iter()
        .filter_map(|(p, v)| v.map(|v| (p, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AirPollutionEntry {
    #[serde(default)]
    pub dt: Option<i64>,
    pub components: Components,
}

/// Response of `/data/2.5/air_pollution`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AirPollutionResponse {
    #[serde(default)]
    pub list: Vec<AirPollutionEntry>,
}
