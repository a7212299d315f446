use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which upstream API a request was sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Geocoding,
    Forecast,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geocoding => write!(f, "Geocoding"),
            Self::Forecast => write!(f, "Forecast"),
        }
    }
}

/// Best match for a free-text place name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    /// Empty when the geocoder has no country for the place (e.g. open sea)
    pub country: String,
    /// IANA timezone id, e.g. "Europe/London"
    pub timezone_id: String,
}

/// Current conditions at the searched coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation time, epoch seconds (UTC)
    pub time: i64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: i32,
    pub wind_speed_ms: f64,
    /// 0-359, meteorological (direction the wind comes from)
    pub wind_direction_deg: i32,
    pub pressure_hpa: f64,
    pub visibility_m: f64,
    pub cloud_cover_pct: i32,
    pub weather_code: i32,
    pub is_daytime: bool,
}

/// One step of the hourly series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub time: i64,
    pub temperature_c: f64,
    pub weather_code: i32,
}

/// One day of the daily series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    /// Calendar date in the place's local timezone
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// Everything a single forecast request returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    /// Offset of the place's local time from UTC, as reported by the API
    pub utc_offset_seconds: i32,
    pub timezone: String,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyEntry>,
    /// Today first, then the following days
    pub daily: Vec<DailyForecastEntry>,
}

impl WeatherPayload {
    /// Today's entry, when the daily series is non-empty
    pub fn today(&self) -> Option<&DailyForecastEntry> {
        self.daily.first()
    }

    /// Days after today, at most `days` of them
    pub fn upcoming_days(&self, days: usize) -> &[DailyForecastEntry] {
        let end = self.daily.len().min(days + 1);
        self.daily.get(1..end).unwrap_or(&[])
    }
}

/// Weather lookup errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Place name is empty")]
    EmptyQuery,
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("{endpoint} request failed with status {status}")]
    Http { endpoint: Endpoint, status: u16 },
    #[error("{endpoint} request failed: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// The endpoint involved, for transport and status failures
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Http { endpoint, .. } | Self::Network { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }
}
