//! Structures produced by the AQI pipeline: fetched readings, sub-indices and the final result.

use super::{Location, Pollutant, PollutantReading, Weather};
use crate::aqi::{Aggregate, RiskCategory};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Identifier of the breakpoint standard every result is computed against.
pub const STANDARD: &str = "national-AQI-v1";

/// Raw data obtained by a reading fetcher for one location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedReadings {
    /// All reported concentrations, including zeros. At most one entry per pollutant.
    pub pollutants: Vec<PollutantReading>,
    pub weather: Option<Weather>,
    /// Name of the monitoring station the readings came from, if any.
    pub station: Option<String>,
    /// Timestamp of the most recent sensor value, when the provider reports one.
    pub observed_at: Option<DateTime<Utc>>,
}

/// A pollutant-specific contribution before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubIndex {
    pub pollutant: Pollutant,
    pub value: f64,
}

/// The structured answer to one AQI query. Built once, read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AqiResult {
    final_index: u32,
    standard: &'static str,
    dominant_pollutant: Option<Pollutant>,
    /// `None` when nothing could be scored.
    risk: Option<RiskCategory>,
    sub_indices: BTreeMap<Pollutant, SubIndex>,
    readings: Vec<PollutantReading>,
    location: Location,
    weather: Option<Weather>,
    station: Option<String>,
    observed_at: Option<DateTime<Utc>>,
}

impl AqiResult {
    pub fn new(
        location: Location,
        fetched: FetchedReadings,
        sub_indices: BTreeMap<Pollutant, SubIndex>,
        aggregate: Aggregate,
        risk: Option<RiskCategory>,
    ) -> Self {
        Self {
            final_index: aggregate.final_index,
            standard: STANDARD,
            dominant_pollutant: aggregate.dominant_pollutant,
            risk,
            sub_indices,
            readings: fetched.pollutants,
            location,
            weather: fetched.weather,
            station: fetched.station,
            observed_at: fetched.observed_at,
        }
    }

    pub fn final_index(&self) -> u32 {
        self.final_index
    }

    pub fn standard(&self) -> &'static str {
        self.standard
    }

    pub fn dominant_pollutant(&self) -> Option<Pollutant> {
        self.dominant_pollutant
    }

    pub fn risk(&self) -> Option<RiskCategory> {
        self.risk
    }

    pub fn sub_indices(&self) -> &BTreeMap<Pollutant, SubIndex> {
        &self.sub_indices
    }

    pub fn readings(&self) -> &[PollutantReading] {
        &self.readings
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    pub fn station(&self) -> Option<&str> {
        self.station.as_deref()
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.observed_at
    }

    /// `false` when no pollutant could be scored. Such a result has index 0 but is
    /// not a clean-air reading.
    pub fn has_data(&self) -> bool {
        self.dominant_pollutant.is_some()
    }
}
