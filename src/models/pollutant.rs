//! The six scored pollutants and raw concentration readings.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pollutant covered by the breakpoint standard.
///
/// Ordering follows declaration order and is used to break ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    No2,
    O3,
    Co,
    So2,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::Co,
        Pollutant::So2,
    ];

    /// Short machine code, as used by OpenAQ parameter names.
    pub fn code(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::O3 => "o3",
            Pollutant::Co => "co",
            Pollutant::So2 => "so2",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::O3 => "O3",
            Pollutant::Co => "CO",
            Pollutant::So2 => "SO2",
        }
    }

    /// Converts a µg/m³ concentration into the unit of this pollutant's breakpoint table.
    ///
    /// Only CO differs: its table is expressed in mg/m³.
    pub fn to_table_unit(&self, micrograms_per_cubic_meter: f64) -> f64 {
        match self {
            Pollutant::Co => micrograms_per_cubic_meter / 1000.0,
            _ => micrograms_per_cubic_meter,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Pollutant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pm25" | "pm2.5" | "pm2_5" => Ok(Pollutant::Pm25),
            "pm10" => Ok(Pollutant::Pm10),
            "no2" => Ok(Pollutant::No2),
            "o3" => Ok(Pollutant::O3),
            "co" => Ok(Pollutant::Co),
            "so2" => Ok(Pollutant::So2),
            other => Err(AppError::Provider(format!("unknown pollutant '{}'", other))),
        }
    }
}

/// A raw concentration for one pollutant, always in µg/m³ (CO included).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PollutantReading {
    pub pollutant: Pollutant,
    #[serde(rename = "concentration_ugm3")]
    pub concentration: f64,
}

impl PollutantReading {
    pub fn new(pollutant: Pollutant, concentration: f64) -> Self {
        Self {
            pollutant,
            concentration,
        }
    }

    /// Whether this reading is eligible for scoring. Zero means "not measured".
    pub fn is_scorable(&self) -> bool {
        self.concentration.is_finite() && self.concentration > 0.0
    }
}
