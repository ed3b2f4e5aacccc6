//! Provides a client for interacting with the OpenAQ v3 API.
//!
//! `OpenAQClient` is the station-network provider: it lists monitoring locations
//! around a point and reads the latest value of individual sensors.

use super::http::{build_client, get_json};
use super::{SensorProvider, StationProvider};
use crate::error::Result;
use crate::models::{Location, LocationsResponse, SensorId, SensorReading, SensorsResponse, Station};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

pub const OPENAQ_BASE_URL: &str = "https://api.openaq.org/v3";

/// Radius bounds accepted by the `/locations` endpoint, in metres.
pub const MIN_RADIUS_M: u32 = 1_000;
pub const MAX_RADIUS_M: u32 = 25_000;

/// An asynchronous client for fetching data from the OpenAQ API v3.
pub struct OpenAQClient {
    client: Client,
    api_key: String,
    base_url: String,
    radius_m: u32,
    station_limit: u32,
}

impl OpenAQClient {
    /// Creates a new `OpenAQClient` with the provided API key.
    ///
    /// Uses the default OpenAQ v3 base URL.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, OPENAQ_BASE_URL, timeout)
    }

    /// Creates a new `OpenAQClient` with a custom base URL.
    pub fn with_base_url(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            radius_m: 10_000,
            station_limit: 10,
        })
    }

    /// Sets the station search radius, clamped to what the API accepts.
    pub fn with_search_area(mut self, radius_m: u32, station_limit: u32) -> Self {
        self.radius_m = radius_m.clamp(MIN_RADIUS_M, MAX_RADIUS_M);
        self.station_limit = station_limit.max(1);
        self
    }
}

#[async_trait]
impl StationProvider for OpenAQClient {
    /// Fetches monitoring locations around `location` from the `/locations` endpoint.
    ///
    /// # Arguments
    ///
    /// * `location` - Centre of the search. Coordinates are sent with 4 decimals.
    ///
    /// # Returns
    ///
    /// A `Result` containing the stations in API order, each with its recognised sensors.
    /// An empty list is not an error here; the fetcher decides what it means.
    async fn stations_near(&self, location: &Location) -> Result<Vec<Station>> {
        info!(
            "Fetching stations within {} m of {} ({:.4}, {:.4})",
            self.radius_m,
            location.name(),
            location.latitude(),
            location.longitude()
        );

        let request = self
            .client
            .get(format!("{}/locations", self.base_url))
            .header("X-API-Key", &self.api_key) // API key required by v3
            .query(&[
                (
                    "coordinates",
                    format!("{:.4},{:.4}", location.latitude(), location.longitude()),
                ),
                ("radius", self.radius_m.to_string()),
                ("limit", self.station_limit.to_string()),
            ]);
        let response: LocationsResponse = get_json(request, "OpenAQ locations").await?;

        debug!("Received {} candidate stations", response.results.len());
        Ok(response
            .results
            .into_iter()
            .map(|l| l.into_station())
            .collect())
    }
}

#[async_trait]
impl SensorProvider for OpenAQClient {
    /// Fetches the latest value of one sensor from `/sensors/{id}`.
    ///
    /// Returns `Ok(None)` when the sensor exists but has never reported.
    async fn latest_reading(&self, sensor_id: SensorId) -> Result<Option<SensorReading>> {
        let request = self
            .client
            .get(format!("{}/sensors/{}", self.base_url, sensor_id))
            .header("X-API-Key", &self.api_key);
        let response: SensorsResponse = get_json(request, "OpenAQ sensor").await?;

        // The endpoint wraps the single sensor in a `results` array.

        let reading = response.results.first().and_then(|s| s.latest_reading());
        debug!("Sensor {} latest reading: {:?}", sensor_id, reading);
        Ok(reading)
    }
}
