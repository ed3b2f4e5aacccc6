//! Defines the data structures and models used throughout the engine.
//!
//! Domain types (locations, readings, stations, results) live next to the wire
//! structs used to deserialize the OpenWeatherMap and OpenAQ v3 responses.

mod aqi;
mod location;
mod openaq;
mod openweather;
mod pollutant;
mod station;

pub use aqi::*;
pub use location::*;
pub use openaq::*;
pub use openweather::*;
pub use pollutant::*;
pub use station::*;
