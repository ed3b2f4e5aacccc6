//! Provides a mock data provider for generating plausible air quality readings.
//!
//! Used for the `--source mock` mode and for demos where no API keys are available.
//! It geocodes against a small built-in city table and produces randomized
//! weather and pollutant concentrations scaled by a per-city pollution factor.

use super::{GeocodingProvider, PollutionProvider, WeatherProvider};
use crate::error::Result;
use crate::models::{CurrentWeather, Location, Pollutant};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::debug;

/// A city known to the offline provider.
struct MockCity {
    name: &'static str,
    country: &'static str,
    latitude: f64,
    longitude: f64,
    /// Multiplier applied to baseline concentrations.
    pollution_factor: f64,
}

const CITIES: &[MockCity] = &[
    MockCity { name: "Kochi", country: "IN", latitude: 9.9312, longitude: 76.2673, pollution_factor: 0.8 },
    MockCity { name: "Delhi", country: "IN", latitude: 28.6139, longitude: 77.2090, pollution_factor: 3.0 },
    MockCity { name: "Mumbai", country: "IN", latitude: 19.0760, longitude: 72.8777, pollution_factor: 1.6 },
    MockCity { name: "Bengaluru", country: "IN", latitude: 12.9716, longitude: 77.5946, pollution_factor: 1.1 },
    MockCity { name: "Chennai", country: "IN", latitude: 13.0827, longitude: 80.2707, pollution_factor: 1.2 },
    MockCity { name: "Lahore", country: "PK", latitude: 31.5204, longitude: 74.3587, pollution_factor: 2.6 },
    MockCity { name: "Amsterdam", country: "NL", latitude: 52.3676, longitude: 4.9041, pollution_factor: 0.5 },
    MockCity { name: "Paris", country: "FR", latitude: 48.8566, longitude: 2.3522, pollution_factor: 0.6 },
    MockCity { name: "Athens", country: "GR", latitude: 37.9838, longitude: 23.7275, pollution_factor: 0.8 },
];

/// Maximum distance, in degrees on either axis, for reverse geocoding to match a city.
const REVERSE_MATCH_DEGREES: f64 = 0.5;

/// Generates mock geocoding, weather and pollution data.
pub struct MockDataProvider {
    rng: Mutex<StdRng>,
}

impl MockDataProvider {
    /// Creates a provider seeded from system entropy.
    pub fn new() -> Self {
        debug!("Creating MockDataProvider");
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a provider whose output is reproducible for a given seed.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for the internal `StdRng`. Equal seeds give equal readings
    ///   for the same sequence of calls.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    fn nearest_city(latitude: f64, longitude: f64) -> Option<&'static MockCity> {
        CITIES
            .iter()
            .filter(|c| {
                (c.latitude - latitude).abs() <= REVERSE_MATCH_DEGREES
                    && (c.longitude - longitude).abs() <= REVERSE_MATCH_DEGREES
            })
            .min_by(|a, b| {
                let da = (a.latitude - latitude).powi(2) + (a.longitude - longitude).powi(2);
                let db = (b.latitude - latitude).powi(2) + (b.longitude - longitude).powi(2);
                da.total_cmp(&db)
            })
    }

    /// Typical baseline range for each pollutant in µg/m³.
    fn base_range(pollutant: Pollutant) -> (f64, f64) {
        match pollutant {
            Pollutant::Pm25 => (5.0, 35.0),
            Pollutant::Pm10 => (10.0, 50.0),
            Pollutant::No2 => (10.0, 60.0),
            Pollutant::O3 => (30.0, 100.0),
            Pollutant::Co => (200.0, 1200.0),
            Pollutant::So2 => (2.0, 20.0),
        }
    }
}

impl Default for MockDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeocodingProvider for MockDataProvider {
    async fn search(&self, text: &str, region_hint: Option<&str>) -> Result<Vec<Location>> {
        let needle = text.trim();
        let matches = CITIES
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(needle))
            .filter(|c| match region_hint {
                Some(region) if !region.is_empty() => c.country.eq_ignore_ascii_case(region),
                _ => true,
            })
            .map(|c| Location::new(c.name, c.latitude, c.longitude))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Mock geocoder matched {} cities for '{}' (region {:?})",
            matches.len(),
            needle,
            region_hint
        );
        Ok(matches)
    }

    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Location>> {
        match Self::nearest_city(latitude, longitude) {
            Some(city) => Ok(vec![Location::new(city.name, latitude, longitude)?]),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl WeatherProvider for MockDataProvider {
    async fn current_weather(&self, latitude: f64, _longitude: f64) -> Result<CurrentWeather> {
        // Warmer towards the equator.
        let base_temp = 30.0 - latitude.abs() * 0.35;
        Ok(self.with_rng(|rng| CurrentWeather {
            temperature_c: base_temp + rng.gen_range(-4.0..4.0),
            humidity_percent: rng.gen_range(35.0..95.0_f64).round(),
            wind_speed_mps: rng.gen_range(0.5..9.0),
        }))
    }
}

#[async_trait]
impl PollutionProvider for MockDataProvider {
    /// Generates one concentration per pollutant, scaled by the nearest city's factor.
    ///
    /// Locations away from every known city use a factor of 1.0.
    async fn current_pollution(&self, latitude: f64, longitude: f64) -> Result<BTreeMap<Pollutant, f64>> {
        let factor = Self::nearest_city(latitude, longitude)
            .map(|c| c.pollution_factor)
            .unwrap_or(1.0);

        let concentrations = self.with_rng(|rng| {
            Pollutant::ALL
                .into_iter()
                .map(|p| {
                    let (min_base, max_base) = Self::base_range(p);
                    let min = min_base * factor;
                    let max = (max_base * factor).max(min + 1.0);
                    (p, rng.gen_range(min..max))
                })
                .collect::<BTreeMap<_, _>>()
        });

        debug!("Generated mock concentrations: {:?}", concentrations);
        Ok(concentrations)
    }
}
