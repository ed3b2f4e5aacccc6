//! Runtime configuration read from the environment (and an optional `.env` file).

use crate::api::{OPENAQ_BASE_URL, OWM_BASE_URL};
use crate::error::{AppError, Result};
use clap::ValueEnum;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::error;

/// Region used to scope name lookups when `AQI_REGION` is not set.
pub const DEFAULT_REGION: &str = "IN";

/// Which providers back the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSource {
    /// OpenWeatherMap geocoding, weather and direct pollution readings.
    Owm,
    /// OpenWeatherMap geocoding and weather, OpenAQ monitoring stations.
    Openaq,
    /// Offline generated data, no network access.
    Mock,
}

/// Settings for providers, timeouts and logging.
#[derive(Debug, Clone)]
pub struct Settings {
    pub owm_api_key: Option<String>,
    pub openaq_key: Option<String>,
    /// `None` disables region scoping of name lookups.
    pub region: Option<String>,
    pub http_timeout: Duration,
    pub sensor_timeout: Duration,
    pub openaq_radius_m: u32,
    pub openaq_station_limit: u32,
    pub owm_base_url: String,
    pub openaq_base_url: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owm_api_key: None,
            openaq_key: None,
            region: Some(DEFAULT_REGION.to_string()),
            http_timeout: Duration::from_secs(10),
            sensor_timeout: Duration::from_secs(5),
            openaq_radius_m: 10_000,
            openaq_station_limit: 10,
            owm_base_url: OWM_BASE_URL.to_string(),
            openaq_base_url: OPENAQ_BASE_URL.to_string(),
            log_dir: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match non_empty_var(name) {
        Some(raw) => raw.parse().map_err(|_| {
            error!("{} has an invalid value: {}", name, raw);
            AppError::Config(format!("{} must be a number, got '{}'", name, raw))
        }),
        None => Ok(default),
    }
}

/// The log directory from `AQI_LOG_DIR`.
///
/// Read on its own so logging can be installed before the rest of the
/// settings are parsed and can report their errors.
pub fn log_dir_from_env() -> Option<PathBuf> {
    non_empty_var("AQI_LOG_DIR").map(PathBuf::from)
}

impl Settings {
    /// Loads `.env` (if present) and then reads the environment.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads settings from the process environment only.
    pub fn from_env() -> Result<Self> {
        let defaults = Settings::default();

        // Unset means the default region; set-but-empty disables scoping.
        let region = match env::var("AQI_REGION") {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(value.trim().to_uppercase()),
            Err(_) => defaults.region,
        };

        Ok(Self {
            owm_api_key: non_empty_var("OWM_API_KEY"),
            openaq_key: non_empty_var("OPENAQ_KEY"),
            region,
            http_timeout: Duration::from_secs(parse_var("AQI_HTTP_TIMEOUT_SECS", 10u64)?),
            sensor_timeout: Duration::from_secs(parse_var("AQI_SENSOR_TIMEOUT_SECS", 5u64)?),
            openaq_radius_m: parse_var("OPENAQ_RADIUS_M", defaults.openaq_radius_m)?,
            openaq_station_limit: parse_var("OPENAQ_STATION_LIMIT", defaults.openaq_station_limit)?,
            owm_base_url: non_empty_var("OWM_BASE_URL").unwrap_or(defaults.owm_base_url),
            openaq_base_url: non_empty_var("OPENAQ_BASE_URL").unwrap_or(defaults.openaq_base_url),
            log_dir: log_dir_from_env(),
        })
    }

    /// The OpenWeatherMap key, or a configuration error naming the variable.
    pub fn require_owm_key(&self) -> Result<String> {
        self.owm_api_key.clone().ok_or_else(|| {
            error!("OWM_API_KEY environment variable not set");
            AppError::Config("OWM_API_KEY environment variable not set".to_string())
        })
    }

    /// The OpenAQ key, or a configuration error naming the variable.
    pub fn require_openaq_key(&self) -> Result<String> {
        self.openaq_key.clone().ok_or_else(|| {
            error!("OPENAQ_KEY environment variable not set");
            AppError::Config("OPENAQ_KEY environment variable not set".to_string())
        })
    }
}
