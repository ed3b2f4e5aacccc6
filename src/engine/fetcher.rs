//! Obtains raw pollutant and weather values for a resolved location.
//!
//! Two provider shapes sit behind [`ReadingFetcher`]:
//! - [`DirectReadingFetcher`]: one call per data category at the coordinates.
//! - [`StationNetworkFetcher`]: pick the best nearby station, then query each of its
//!   sensors concurrently. Individual sensor failures only drop that pollutant.

use super::bounded;
use crate::api::{PollutionProvider, SensorProvider, StationProvider, WeatherProvider};
use crate::error::{AppError, Result};
use crate::models::{
    FetchedReadings, Location, Pollutant, PollutantReading, SensorReading, Station, StationSensor, Weather,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Gets pollutant readings (and weather, when available) for a location.
#[async_trait]
pub trait ReadingFetcher: Send + Sync {
    async fn fetch(&self, location: &Location) -> Result<FetchedReadings>;
}

async fn fetch_weather(
    provider: Option<&Arc<dyn WeatherProvider>>,
    location: &Location,
    timeout: Duration,
) -> Result<Option<Weather>> {
    match provider {
        Some(p) => {
            let current = bounded(
                "weather",
                timeout,
                p.current_weather(location.latitude(), location.longitude()),
            )
            .await?;
            Ok(Some(current.into()))
        },
        None => Ok(None),
    }
}

/// Fetcher for providers that report one concentration per pollutant at a point.
pub struct DirectReadingFetcher {
    pollution: Arc<dyn PollutionProvider>,
    weather: Option<Arc<dyn WeatherProvider>>,
    timeout: Duration,
}

impl DirectReadingFetcher {
    pub fn new(
        pollution: Arc<dyn PollutionProvider>,
        weather: Option<Arc<dyn WeatherProvider>>,
        timeout: Duration,
    ) -> Self {
        Self {
            pollution,
            weather,
            timeout,
        }
    }
}

#[async_trait]
impl ReadingFetcher for DirectReadingFetcher {
    async fn fetch(&self, location: &Location) -> Result<FetchedReadings> {
        info!("Fetching direct readings for {}", location.name());

        let pollution = bounded(
            "air pollution",
            self.timeout,
            self.pollution
                .current_pollution(location.latitude(), location.longitude()),
        );
        let weather = fetch_weather(self.weather.as_ref(), location, self.timeout);
        let (concentrations, weather) = tokio::try_join!(pollution, weather)?;

        let pollutants = concentrations
            .into_iter()
            .map(|(pollutant, concentration)| PollutantReading::new(pollutant, concentration))
            .collect();

        Ok(FetchedReadings {
            pollutants,
            weather,
            station: None,
            observed_at: None,
        })
    }
}

/// Chooses the station exposing the most sensors; the first one wins ties.
pub fn select_station(stations: &[Station]) -> Option<&Station> {
    stations.iter().fold(None, |best, station| match best {
        Some(b) if station.sensor_count() <= b.sensor_count() => Some(b),
        _ => Some(station),
    })
}

/// Fetcher for station-network providers.
pub struct StationNetworkFetcher {
    stations: Arc<dyn StationProvider>,
    sensors: Arc<dyn SensorProvider>,
    weather: Option<Arc<dyn WeatherProvider>>,
    timeout: Duration,
    sensor_timeout: Duration,
}

impl StationNetworkFetcher {
    /// Creates a fetcher over a station network.
    ///
    /// # Arguments
    ///
    /// * `stations` - Lists candidate stations around a location.
    /// * `sensors` - Reads the latest value of a single sensor.
    /// * `weather` - Optional weather source, queried alongside the sensors.
    /// * `timeout` - Budget for the station search and the weather call. Expiry fails the fetch.
    /// * `sensor_timeout` - Budget for each sensor query. Expiry only drops that pollutant.
    pub fn new(
        stations: Arc<dyn StationProvider>,
        sensors: Arc<dyn SensorProvider>,
        weather: Option<Arc<dyn WeatherProvider>>,
        timeout: Duration,
        sensor_timeout: Duration,
    ) -> Self {
        Self {
            stations,
            sensors,
            weather,
            timeout,
            sensor_timeout,
        }
    }

    /// Queries every sensor of `station` concurrently and merges the results by pollutant.
    async fn read_sensors(&self, station: &Station) -> (BTreeMap<Pollutant, PollutantReading>, Option<DateTime<Utc>>) {
        let mut tasks = JoinSet::new();
        for &sensor in station.sensors() {
            let provider = Arc::clone(&self.sensors);
            let limit = self.sensor_timeout;
            tasks.spawn(async move {
                let result = bounded("sensor query", limit, provider.latest_reading(sensor.id)).await;
                (sensor, result)
            });
        }

        let mut readings = BTreeMap::new();
        let mut observed_at: Option<DateTime<Utc>> = None;
        while let Some(joined) = tasks.join_next().await {
            let (sensor, result): (StationSensor, Result<Option<SensorReading>>) = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Sensor task on station {} did not complete: {}", station.id, e);
                    continue;
                },
            };

            match result {
                Ok(Some(reading)) if reading.value.is_finite() && reading.value >= 0.0 => {
                    debug!("Sensor {} ({}) = {}", sensor.id, sensor.pollutant, reading.value);
                    readings.insert(
                        sensor.pollutant,
                        PollutantReading::new(sensor.pollutant, reading.value),
                    );
                    if let Some(ts) = reading.timestamp {
                        observed_at = Some(observed_at.map_or(ts, |cur| cur.max(ts)));
                    }
                },
                Ok(Some(reading)) => {
                    debug!(
                        "Sensor {} ({}) reported unusable value {}, skipping",
                        sensor.id, sensor.pollutant, reading.value
                    );
                },
                Ok(None) => {
                    debug!("Sensor {} ({}) has no latest value", sensor.id, sensor.pollutant);
                },
                Err(e) => {
                    warn!(
                        "Sensor {} ({}) unavailable, continuing without it: {}",
                        sensor.id, sensor.pollutant, e
                    );
                },
            }
        }

        (readings, observed_at)
    }
}

#[async_trait]
impl ReadingFetcher for StationNetworkFetcher {
    async fn fetch(&self, location: &Location) -> Result<FetchedReadings> {
        let stations = bounded("station search", self.timeout, self.stations.stations_near(location)).await?;

        let station = select_station(&stations)
            .ok_or_else(|| AppError::NotFound("no monitoring stations found".to_string()))?;
        info!(
            "Selected station '{}' ({} sensors) out of {} candidates",
            station.name,
            station.sensor_count(),
            stations.len()
        );

        let ((readings, observed_at), weather) = tokio::join!(
            self.read_sensors(station),
            fetch_weather(self.weather.as_ref(), location, self.timeout)
        );

        Ok(FetchedReadings {
            pollutants: readings.into_values().collect(),
            weather: weather?,
            station: Some(station.name.clone()),
            observed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{CurrentWeather, SensorId};
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn station(id: i64, name: &str, pollutants: &[Pollutant]) -> Station {
        Station::new(
            id,
            name,
            pollutants.iter().enumerate().map(|(i, &p)| StationSensor {
                id: id * 100 + i as i64,
                pollutant: p,
            }),
        )
    }

    #[test]
    fn test_select_station_prefers_first_maximum() {
        use Pollutant::*;
        let stations = vec![
            station(1, "A", &[Pm25, Pm10, No2]),
            station(2, "B", &[Pm25, Pm10, No2, O3, Co]),
            station(3, "C", &[Pm25, Pm10, No2, O3, So2]),
        ];
        assert_eq!(select_station(&stations).unwrap().name, "B");
        assert!(select_station(&[]).is_none());
    }

    // --- Mock station network ---
    #[derive(Clone, Copy)]
    enum SensorBehaviour {
        Value(f64),
        Missing,
        Fail,
        Hang,
    }

    struct MockNetwork {
        stations: Result<Vec<Station>>,
        sensors: HashMap<SensorId, SensorBehaviour>,
        queried: Mutex<Vec<SensorId>>,
    }

    impl MockNetwork {
        fn new(stations: Result<Vec<Station>>, sensors: Vec<(SensorId, SensorBehaviour)>) -> Arc<Self> {
            Arc::new(Self {
                stations,
                sensors: sensors.into_iter().collect(),
                queried: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl StationProvider for MockNetwork {
        async fn stations_near(&self, _location: &Location) -> Result<Vec<Station>> {
            self.stations.clone()
        }
    }

    #[async_trait]
    impl SensorProvider for MockNetwork {
        async fn latest_reading(&self, sensor_id: SensorId) -> Result<Option<SensorReading>> {
            self.queried.lock().unwrap().push(sensor_id);
            match self.sensors.get(&sensor_id).copied().unwrap_or(SensorBehaviour::Missing) {
                SensorBehaviour::Value(value) => Ok(Some(SensorReading {
                    value,
                    timestamp: Some(Utc.with_ymd_and_hms(2024, 3, 10, 10, sensor_id as u32 % 60, 0).unwrap()),
                })),
                SensorBehaviour::Missing => Ok(None),
                SensorBehaviour::Fail => Err(AppError::Provider("sensor endpoint returned 500".to_string())),
                SensorBehaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(None)
                },
            }
        }
    }

    struct FixedWeather(Result<CurrentWeather>);

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn current_weather(&self, _latitude: f64, _longitude: f64) -> Result<CurrentWeather> {
            self.0.clone()
        }
    }

    struct FixedPollution(BTreeMap<Pollutant, f64>);

    #[async_trait]
    impl PollutionProvider for FixedPollution {
        async fn current_pollution(&self, _latitude: f64, _longitude: f64) -> Result<BTreeMap<Pollutant, f64>> {
            Ok(self.0.clone())
        }
    }

    fn kochi() -> Location {
        Location::new("Kochi", 9.93, 76.26).unwrap()
    }

    fn network_fetcher(network: Arc<MockNetwork>) -> StationNetworkFetcher {
        StationNetworkFetcher::new(
            network.clone(),
            network,
            None,
            Duration::from_secs(2),
            Duration::from_millis(100),
        )
    }

    #[tokio::test]
    async fn test_station_fetch_degrades_per_sensor() {
        use Pollutant::*;
        let chosen = station(7, "Kacheripady", &[Pm25, Pm10, No2, O3, Co, So2]);
        let network = MockNetwork::new(
            Ok(vec![station(1, "Small", &[Pm25]), chosen]),
            vec![
                (700, SensorBehaviour::Value(65.0)), // pm25
                (701, SensorBehaviour::Value(-1.0)), // pm10, negative
                (702, SensorBehaviour::Fail),        // no2
                (703, SensorBehaviour::Missing),     // o3
                (704, SensorBehaviour::Hang),        // co
                (705, SensorBehaviour::Value(0.0)),  // so2, zero is still a reading
            ],
        );

        let fetched = network_fetcher(network.clone()).fetch(&kochi()).await.unwrap();

        assert_eq!(fetched.station.as_deref(), Some("Kacheripady"));
        assert_eq!(
            fetched.pollutants,
            vec![
                PollutantReading::new(Pm25, 65.0),
                PollutantReading::new(So2, 0.0)
            ]
        );
        assert_eq!(
            fetched.observed_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 10, 705 % 60, 0).unwrap())
        );
        let mut queried = network.queried.lock().unwrap().clone();
        queried.sort();
        assert_eq!(queried, vec![700, 701, 702, 703, 704, 705]);
    }

    #[tokio::test]
    async fn test_no_stations_is_not_found() {
        let network = MockNetwork::new(Ok(Vec::new()), Vec::new());
        let err = network_fetcher(network).fetch(&kochi()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "no monitoring stations found");
    }

    #[tokio::test]
    async fn test_station_search_failure_propagates() {
        let network = MockNetwork::new(Err(AppError::Provider("502 Bad Gateway".to_string())), Vec::new());
        let err = network_fetcher(network).fetch(&kochi()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Provider);
    }

    #[tokio::test]
    async fn test_all_sensors_failing_yields_empty_readings() {
        let network = MockNetwork::new(
            Ok(vec![station(3, "Broken", &[Pollutant::Pm25, Pollutant::No2])]),
            vec![(300, SensorBehaviour::Fail), (301, SensorBehaviour::Fail)],
        );
        let fetched = network_fetcher(network).fetch(&kochi()).await.unwrap();
        assert!(fetched.pollutants.is_empty());
        assert_eq!(fetched.observed_at, None);
    }

    #[tokio::test]
    async fn test_station_fetch_attaches_weather() {
        let network = MockNetwork::new(
            Ok(vec![station(4, "Aluva", &[Pollutant::Pm10])]),
            vec![(400, SensorBehaviour::Value(80.0))],
        );
        let weather = Arc::new(FixedWeather(Ok(CurrentWeather {
            temperature_c: 30.0,
            humidity_percent: 75.0,
            wind_speed_mps: 2.0,
        })));
        let fetcher = StationNetworkFetcher::new(
            network.clone(),
            network,
            Some(weather),
            Duration::from_secs(2),
            Duration::from_millis(100),
        );

        let fetched = fetcher.fetch(&kochi()).await.unwrap();
        let weather = fetched.weather.unwrap();
        assert!((weather.wind_speed_kmh - 7.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_station_fetch_fails_when_weather_fails() {
        let network = MockNetwork::new(
            Ok(vec![station(5, "Eloor", &[Pollutant::Pm25, Pollutant::So2])]),
            vec![
                (500, SensorBehaviour::Value(42.0)),
                (501, SensorBehaviour::Value(9.0)),
            ],
        );
        let weather = Arc::new(FixedWeather(Err(AppError::Provider(
            "weather request failed with status 503".to_string(),
        ))));
        let fetcher = StationNetworkFetcher::new(
            network.clone(),
            network.clone(),
            Some(weather),
            Duration::from_secs(2),
            Duration::from_millis(100),
        );

        let err = fetcher.fetch(&kochi()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Provider);
        // Sensors were still read; their values are dropped with the failed fetch.
        assert_eq!(network.queried.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_direct_fetch_returns_every_reported_pollutant() {
        let pollution = Arc::new(FixedPollution(BTreeMap::from([
            (Pollutant::Pm25, 65.0),
            (Pollutant::Co, 1500.0),
            (Pollutant::So2, 0.0),
        ])));
        let weather = Arc::new(FixedWeather(Ok(CurrentWeather {
            temperature_c: 28.0,
            humidity_percent: 80.0,
            wind_speed_mps: 1.0,
        })));
        let fetcher = DirectReadingFetcher::new(pollution, Some(weather), Duration::from_secs(2));

        let fetched = fetcher.fetch(&kochi()).await.unwrap();
        assert_eq!(fetched.pollutants.len(), 3);
        assert_eq!(fetched.station, None);
        assert!((fetched.weather.unwrap().wind_speed_kmh - 3.6).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_direct_fetch_weather_failure_propagates() {
        let pollution = Arc::new(FixedPollution(BTreeMap::from([(Pollutant::Pm25, 10.0)])));
        let weather = Arc::new(FixedWeather(Err(AppError::Provider("timeout".to_string()))));
        let fetcher = DirectReadingFetcher::new(pollution, Some(weather), Duration::from_secs(2));

        let err = fetcher.fetch(&kochi()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Provider);
    }
}
