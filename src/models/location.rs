//! Locations, location queries and ambient weather.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Name substituted when reverse geocoding yields nothing for a coordinate query.
pub const FALLBACK_LOCATION_NAME: &str = "Your Location";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(AppError::Validation(format!(
                "coordinates must be finite numbers (got {}, {})",
                latitude, longitude
            )));
        }
        let coords = Self {
            latitude,
            longitude,
        };
        coords.validate()?;
        Ok(coords)
    }
}

/// A canonical, resolved location.
///
/// Fields are private: once produced by the resolver a `Location` is never changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a location, validating the coordinate ranges.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        let coords = Coordinates::new(latitude, longitude)?;
        Ok(Self {
            name: name.into(),
            latitude: coords.latitude,
            longitude: coords.longitude,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// What the caller asked for: a place name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    ByName(String),
    ByCoords(Coordinates),
}

impl LocationQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        LocationQuery::ByName(name.into())
    }

    pub fn by_coords(latitude: f64, longitude: f64) -> Self {
        LocationQuery::ByCoords(Coordinates {
            latitude,
            longitude,
        })
    }

    /// Rejects empty names and malformed coordinates before any outbound call.
    pub fn validate(&self) -> Result<()> {
        match self {
            LocationQuery::ByName(name) if name.trim().is_empty() => Err(AppError::Validation(
                "city name must not be empty".to_string(),
            )),
            LocationQuery::ByName(_) => Ok(()),
            LocationQuery::ByCoords(c) => Coordinates::new(c.latitude, c.longitude).map(|_| ()),
        }
    }
}

/// Weather as reported by a provider, wind in metres per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub wind_speed_mps: f64,
}

/// Weather attached to an [`AqiResult`](crate::models::AqiResult), wind in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weather {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub wind_speed_kmh: f64,
}

impl From<CurrentWeather> for Weather {
    fn from(w: CurrentWeather) -> Self {
        Self {
            temperature_c: w.temperature_c,
            humidity_percent: w.humidity_percent,
            wind_speed_kmh: w.wind_speed_mps * 3.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(9.93, 76.26)]
    fn test_location_accepts_valid_ranges(#[case] lat: f64, #[case] lon: f64) {
        let loc = Location::new("Somewhere", lat, lon).unwrap();
        assert_eq!(loc.latitude(), lat);
        assert_eq!(loc.longitude(), lon);
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(0.0, -180.1)]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn test_location_rejects_invalid_ranges(#[case] lat: f64, #[case] lon: f64) {
        let err = Location::new("Nowhere", lat, lon).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_query_validation() {
        assert!(LocationQuery::by_name("Kochi").validate().is_ok());
        assert_eq!(
            LocationQuery::by_name("   ").validate().unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            LocationQuery::by_coords(120.0, 0.0)
                .validate()
                .unwrap_err()
                .kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_wind_speed_converted_to_kmh() {
        let weather: Weather = CurrentWeather {
            temperature_c: 29.0,
            humidity_percent: 80.0,
            wind_speed_mps: 5.0,
        }
        .into();
        assert!((weather.wind_speed_kmh - 18.0).abs() < 1e-9);
    }
}
