//! Air Quality Index computation and aggregation.
//!
//! Resolves a city name or coordinate pair to a location, fetches pollutant
//! concentrations from a provider (direct readings or a station network), scores
//! each pollutant against the national breakpoint tables and reports the final
//! index with its dominant pollutant and risk band.

pub mod api;
pub mod aqi;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;

pub use config::{DataSource, Settings};
pub use engine::AqiEngine;
pub use error::{AppError, Result};
pub use models::{AqiResult, LocationQuery};
