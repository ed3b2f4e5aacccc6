//! Provides a client for the OpenWeatherMap geocoding, weather and air pollution APIs.
//!
//! `OpenWeatherClient` is the direct-reading provider: one call per data category
//! returns one value per pollutant at the queried coordinates.

use super::http::{build_client, get_json};
use super::{GeocodingProvider, PollutionProvider, WeatherProvider};
use crate::error::{AppError, Result};
use crate::models::{
    AirPollutionResponse, CurrentWeather, GeoResult, Location, Pollutant, WeatherResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

pub const OWM_BASE_URL: &str = "https://api.openweathermap.org";

/// An asynchronous client for OpenWeatherMap.
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Creates a new `OpenWeatherClient` against the public API.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, OWM_BASE_URL, timeout)
    }

    /// Creates a new `OpenWeatherClient` with a custom base URL (proxies, mock servers).
    pub fn with_base_url(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("appid", self.api_key.as_str())])
    }

    fn to_locations(results: Vec<GeoResult>, fallback_name: &str) -> Result<Vec<Location>> {
        results
            .into_iter()
            .map(|g| {
                let name = if g.name.trim().is_empty() {
                    fallback_name.to_string()
                } else {
                    g.name
                };
                Location::new(name, g.lat, g.lon).map_err(|e| {
                    AppError::Provider(format!("geocoder returned invalid coordinates: {}", e))
                })
            })
            .collect()
    }
}

#[async_trait]
impl GeocodingProvider for OpenWeatherClient {
    async fn search(&self, text: &str, region_hint: Option<&str>) -> Result<Vec<Location>> {
        let text = text.trim();
        let q = match region_hint {
            Some(region) if !region.is_empty() => format!("{},{}", text, region),
            _ => text.to_string(),
        };
        info!("Geocoding '{}'", q);

        let request = self
            .get("/geo/1.0/direct")
            .query(&[("q", q.as_str()), ("limit", "1")]);
        let results: Vec<GeoResult> = get_json(request, "geocoding").await?;

        debug!("Geocoder returned {} candidates for '{}'", results.len(), q);
        Self::to_locations(results, text)
    }

    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Location>> {
        info!("Reverse geocoding {}, {}", latitude, longitude);

        let request = self.get("/geo/1.0/reverse").query(&[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("limit", "1".to_string()),
        ]);
        let results: Vec<GeoResult> = get_json(request, "reverse geocoding").await?;

        debug!("Reverse geocoder returned {} candidates", results.len());
        Self::to_locations(results, "")
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather> {
        let request = self.get("/data/2.5/weather").query(&[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("units", "metric".to_string()),
        ]);
        let response: WeatherResponse = get_json(request, "weather").await?;
        let weather = response.into_current();

        debug!(
            "Weather: temp={} humidity={} wind={} m/s",
            weather.temperature_c, weather.humidity_percent, weather.wind_speed_mps
        );
        Ok(weather)
    }
}

#[async_trait]
impl PollutionProvider for OpenWeatherClient {
    async fn current_pollution(&self, latitude: f64, longitude: f64) -> Result<BTreeMap<Pollutant, f64>> {
        let request = self.get("/data/2.5/air_pollution").query(&[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ]);
        let response: AirPollutionResponse = get_json(request, "air pollution").await?;

        let entry = response.list.into_iter().next().ok_or_else(|| {
            AppError::Provider("air pollution response contained no entries".to_string())
        })?;
        let concentrations = entry.components.concentrations();

        debug!("Pollutants (µg/m³): {:?}", concentrations);
        Ok(concentrations)
    }
}
