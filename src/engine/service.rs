//! The engine entry point used by front-ends.

use super::{DirectReadingFetcher, LocationResolver, ReadingFetcher, StationNetworkFetcher};
use crate::api::{MockDataProvider, OpenAQClient, OpenWeatherClient};
use crate::aqi::{aggregate_sub_indices, classify, score};
use crate::config::{DataSource, Settings};
use crate::error::Result;
use crate::models::{AqiResult, LocationQuery};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Computes AQI results. Holds no per-request state, so one instance serves any
/// number of concurrent queries.
pub struct AqiEngine {
    resolver: LocationResolver,
    fetcher: Arc<dyn ReadingFetcher>,
}

impl AqiEngine {
    pub fn new(resolver: LocationResolver, fetcher: Arc<dyn ReadingFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Wires the providers selected by `source` using `settings`.
    pub fn from_settings(settings: &Settings, source: DataSource) -> Result<Self> {
        let timeout = settings.http_timeout;
        let region = settings.region.clone();

        let engine = match source {
            DataSource::Owm => {
                let owm = Arc::new(OpenWeatherClient::with_base_url(
                    settings.require_owm_key()?,
                    &settings.owm_base_url,
                    timeout,
                )?);
                let fetcher = DirectReadingFetcher::new(owm.clone(), Some(owm.clone()), timeout);
                Self::new(LocationResolver::new(owm, region, timeout), Arc::new(fetcher))
            },
            DataSource::Openaq => {
                let owm = Arc::new(OpenWeatherClient::with_base_url(
                    settings.require_owm_key()?,
                    &settings.owm_base_url,
                    timeout,
                )?);
                let openaq = Arc::new(
                    OpenAQClient::with_base_url(
                        settings.require_openaq_key()?,
                        &settings.openaq_base_url,
                        timeout,
                    )?
                    .with_search_area(settings.openaq_radius_m, settings.openaq_station_limit),
                );
                let fetcher = StationNetworkFetcher::new(
                    openaq.clone(),
                    openaq,
                    Some(owm.clone()),
                    timeout,
                    settings.sensor_timeout,
                );
                Self::new(LocationResolver::new(owm, region, timeout), Arc::new(fetcher))
            },
            DataSource::Mock => {
                let mock = Arc::new(MockDataProvider::new());
                let fetcher = DirectReadingFetcher::new(mock.clone(), Some(mock.clone()), timeout);
                Self::new(LocationResolver::new(mock, region, timeout), Arc::new(fetcher))
            },
        };

        info!("AQI engine ready with {:?} data source", source);
        Ok(engine)
    }

    /// Resolves the query, fetches readings and computes the index and risk band.
    ///
    /// # Arguments
    ///
    /// * `query` - A city name or a coordinate pair.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AqiResult`. When no pollutant could be scored the
    /// result has index 0, no dominant pollutant and no risk band.
    ///
    /// Errors propagate unchanged so callers can tell `NotFound` from `Provider`.
    #[instrument(skip(self))]
    pub async fn compute_aqi(&self, query: LocationQuery) -> Result<AqiResult> {
        let location = self.resolver.resolve(&query).await?;
        let fetched = self.fetcher.fetch(&location).await?;

        let sub_indices = score(&fetched.pollutants);
        let aggregate = aggregate_sub_indices(&sub_indices);
        // No risk band without a scored pollutant; index 0 here is not clean air.
        let risk = aggregate
            .dominant_pollutant
            .map(|_| classify(aggregate.final_index));

        match (aggregate.dominant_pollutant, risk) {
            (Some(dominant), Some(risk)) => info!(
                "AQI for {}: {} ({}), dominant {}",
                location.name(),
                aggregate.final_index,
                risk,
                dominant
            ),
            _ => warn!(
                "No pollutant could be scored for {}, reporting insufficient data",
                location.name()
            ),
        }

        Ok(AqiResult::new(location, fetched, sub_indices, aggregate, risk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GeocodingProvider, MockDataProvider};
    use crate::aqi::RiskCategory;
    use crate::engine::DirectReadingFetcher;
    use crate::error::{AppError, ErrorKind};
    use crate::models::{FetchedReadings, Location, Pollutant, PollutantReading, STANDARD};
    use async_trait::async_trait;
    use std::time::Duration;

    struct OneCity;

    #[async_trait]
    impl GeocodingProvider for OneCity {
        async fn search(&self, text: &str, _region_hint: Option<&str>) -> Result<Vec<Location>> {
            if text.eq_ignore_ascii_case("kochi") {
                Ok(vec![Location::new("Kochi", 9.9312, 76.2673)?])
            } else {
                Ok(Vec::new())
            }
        }

        async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Vec<Location>> {
            Ok(Vec::new())
        }
    }

    struct StaticFetcher(Result<FetchedReadings>);

    #[async_trait]
    impl ReadingFetcher for StaticFetcher {
        async fn fetch(&self, _location: &Location) -> Result<FetchedReadings> {
            self.0.clone()
        }
    }

    fn engine(fetched: Result<FetchedReadings>) -> AqiEngine {
        let resolver = LocationResolver::new(Arc::new(OneCity), Some("IN".to_string()), Duration::from_secs(1));
        AqiEngine::new(resolver, Arc::new(StaticFetcher(fetched)))
    }

    fn readings(values: &[(Pollutant, f64)]) -> FetchedReadings {
        FetchedReadings {
            pollutants: values
                .iter()
                .map(|&(p, c)| PollutantReading::new(p, c))
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_single_pm25_reading_end_to_end() {
        let result = engine(Ok(readings(&[(Pollutant::Pm25, 65.0)])))
            .compute_aqi(LocationQuery::by_name("Kochi"))
            .await
            .unwrap();

        assert_eq!(result.final_index(), 118);
        assert_eq!(result.dominant_pollutant(), Some(Pollutant::Pm25));
        assert_eq!(result.risk(), Some(RiskCategory::Poor));
        assert_eq!(result.risk().map(|r| r.label()), Some("Poor"));
        assert_eq!(result.standard(), STANDARD);
        assert_eq!(result.location().name(), "Kochi");
        assert!(result.has_data());
    }

    #[tokio::test]
    async fn test_co_reading_end_to_end() {
        let result = engine(Ok(readings(&[(Pollutant::Co, 1500.0), (Pollutant::So2, 0.0)])))
            .compute_aqi(LocationQuery::by_name("Kochi"))
            .await
            .unwrap();

        assert_eq!(result.final_index(), 76);
        assert_eq!(result.dominant_pollutant(), Some(Pollutant::Co));
        assert_eq!(result.sub_indices().len(), 1);
        // The zero reading is reported but not scored.
        assert_eq!(result.readings().len(), 2);
    }

    #[tokio::test]
    async fn test_no_scorable_readings_is_insufficient_data() {
        let result = engine(Ok(readings(&[(Pollutant::Pm10, 0.0)])))
            .compute_aqi(LocationQuery::by_name("Kochi"))
            .await
            .unwrap();

        assert_eq!(result.final_index(), 0);
        assert_eq!(result.dominant_pollutant(), None);
        assert!(!result.has_data());
        assert_eq!(result.risk(), None);
        assert!(result.sub_indices().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let err = engine(Ok(FetchedReadings::default()))
            .compute_aqi(LocationQuery::by_name("Atlantis"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_errors_propagate_unchanged() {
        let err = engine(Err(AppError::NotFound("no monitoring stations found".to_string())))
            .compute_aqi(LocationQuery::by_name("Kochi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "no monitoring stations found");
    }

    #[test]
    fn test_from_settings_requires_keys_for_network_sources() {
        let settings = Settings::default();
        let err = AqiEngine::from_settings(&settings, DataSource::Owm).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Internal);

        let settings = Settings {
            owm_api_key: Some("owm".to_string()),
            ..Settings::default()
        };
        assert!(AqiEngine::from_settings(&settings, DataSource::Owm).is_ok());
        assert!(AqiEngine::from_settings(&settings, DataSource::Openaq).is_err());
        assert!(AqiEngine::from_settings(&Settings::default(), DataSource::Mock).is_ok());
    }

    #[tokio::test]
    async fn test_offline_provider_pipeline() {
        let provider = Arc::new(MockDataProvider::with_seed(3));
        let resolver = LocationResolver::new(provider.clone(), Some("IN".to_string()), Duration::from_secs(1));
        let fetcher = DirectReadingFetcher::new(provider.clone(), Some(provider), Duration::from_secs(1));
        let engine = AqiEngine::new(resolver, Arc::new(fetcher));

        let result = engine
            .compute_aqi(LocationQuery::by_coords(28.61, 77.21))
            .await
            .unwrap();

        assert_eq!(result.location().name(), "Delhi");
        assert_eq!(result.sub_indices().len(), 6);
        assert!(result.weather().is_some());
        assert_eq!(result.risk(), Some(classify(result.final_index())));
        let max = result
            .sub_indices()
            .values()
            .map(|s| s.value)
            .fold(0.0, f64::max);
        assert_eq!(result.final_index(), max.round() as u32);
    }
}
