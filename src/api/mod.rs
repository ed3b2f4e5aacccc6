//! Provides the provider abstractions and clients for the external data sources.
//!
//! Includes:
//! - `providers`: the capability traits the engine depends on.
//! - `openweather`: OpenWeatherMap client (geocoding, weather, direct pollution readings).
//! - `openaq`: OpenAQ v3 client (monitoring stations and per-sensor latest values).
//! - `mock`: an offline provider generating plausible data.

mod http;
mod mock;
mod openaq;
mod openweather;
mod providers;

pub use mock::*;
pub use openaq::*;
pub use openweather::*;
pub use providers::*;
