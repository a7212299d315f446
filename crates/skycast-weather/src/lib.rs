//! Weather lookup for SkyCast
//!
//! Resolves place names with the Open-Meteo geocoding API, fetches current
//! conditions and forecasts from the Open-Meteo forecast API, and turns the
//! raw values into display labels.

pub mod codes;
pub mod geocode;
mod http;
pub mod present;
pub mod provider;
pub mod types;

pub use geocode::Geocoder;
pub use provider::{WeatherProvider, FORECAST_DAYS};
pub use types::*;
