//! Open-Meteo forecast client.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::http;
use crate::present::local_date;
use crate::types::{
    CurrentConditions, DailyForecastEntry, Endpoint, HourlyEntry, WeatherError, WeatherPayload,
};

/// Today plus the five days shown in the forecast strip
pub const FORECAST_DAYS: usize = 6;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,\
weather_code,wind_speed_10m,wind_direction_10m,cloud_cover,pressure_msl,visibility";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset";

/// Forecast response as requested with `timeformat=unixtime`
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    #[serde(default)]
    timezone: String,
    current: Option<CurrentData>,
    hourly: Option<HourlyData>,
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    time: i64,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    #[serde(default = "default_is_day")]
    is_day: u8,
    weather_code: f64,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
    cloud_cover: f64,
    pressure_msl: f64,
    visibility: f64,
}

fn default_is_day() -> u8 {
    1
}

#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<i64>,
    temperature_2m: Vec<Option<f64>>,
    weather_code: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<i64>,
    weather_code: Vec<Option<f64>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    sunrise: Vec<Option<i64>>,
    #[serde(default)]
    sunset: Vec<Option<i64>>,
}

fn as_int(value: f64) -> i32 {
    value.round() as i32
}

impl From<CurrentData> for CurrentConditions {
    fn from(c: CurrentData) -> Self {
        Self {
            time: c.time,
            temperature_c: c.temperature_2m,
            feels_like_c: c.apparent_temperature,
            humidity_pct: as_int(c.relative_humidity_2m),
            wind_speed_ms: c.wind_speed_10m,
            wind_direction_deg: as_int(c.wind_direction_10m).rem_euclid(360),
            pressure_hpa: c.pressure_msl,
            visibility_m: c.visibility,
            cloud_cover_pct: as_int(c.cloud_cover),
            weather_code: as_int(c.weather_code),
            is_daytime: c.is_day != 0,
        }
    }
}

/// Hourly steps with a gap in any field are dropped.
fn hourly_entries(hourly: HourlyData) -> Vec<HourlyEntry> {
    hourly
        .time
        .into_iter()
        .zip(hourly.temperature_2m)
        .zip(hourly.weather_code)
        .filter_map(|((time, temperature), code)| {
            Some(HourlyEntry {
                time,
                temperature_c: temperature?,
                weather_code: as_int(code?),
            })
        })
        .collect()
}

fn daily_entries(
    daily: DailyData,
    utc_offset_seconds: i32,
) -> Result<Vec<DailyForecastEntry>, WeatherError> {
    let len = daily.time.len();
    if daily.weather_code.len() != len
        || daily.temperature_2m_max.len() != len
        || daily.temperature_2m_min.len() != len
    {
        return Err(WeatherError::Parse(
            "daily series have mismatched lengths".to_string(),
        ));
    }

    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, &time)| -> Result<DailyForecastEntry, WeatherError> {
            let gap = || WeatherError::Parse(format!("daily series has a gap at index {}", i));
            let date = local_date(time, utc_offset_seconds)
                .ok_or_else(|| WeatherError::Parse(format!("invalid daily timestamp {}", time)))?;

            Ok(DailyForecastEntry {
                date,
                weather_code: as_int(daily.weather_code[i].ok_or_else(gap)?),
                temp_max_c: daily.temperature_2m_max[i].ok_or_else(gap)?,
                temp_min_c: daily.temperature_2m_min[i].ok_or_else(gap)?,
                sunrise: daily.sunrise.get(i).copied().flatten(),
                sunset: daily.sunset.get(i).copied().flatten(),
            })
        })
        .collect()
}

impl TryFrom<ForecastResponse> for WeatherPayload {
    type Error = WeatherError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let current = response
            .current
            .ok_or_else(|| WeatherError::Parse("forecast has no current block".to_string()))?;
        Ok(Self {
            utc_offset_seconds: response.utc_offset_seconds,
            timezone: response.timezone,
            current: current.into(),
            hourly: response.hourly.map(hourly_entries).unwrap_or_default(),
            // Without a daily block the current conditions still render
            daily: match response.daily {
                Some(daily) => daily_entries(daily, response.utc_offset_seconds)?,
                None => Vec::new(),
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, WeatherError> {
        let client = http::build_client().map_err(|source| WeatherError::Network {
            endpoint: Endpoint::Forecast,
            source,
        })?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into(),
        })
    }

    /// Fetch current conditions, hourly and daily series for a coordinate.
    ///
    /// `timezone_id` is echoed to the API so that daily dates line up with the
    /// place's local calendar.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
        timezone_id: &str,
    ) -> Result<WeatherPayload, WeatherError> {
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();
        let forecast_days = FORECAST_DAYS.to_string();

        let request = self.client.get(&self.base_url).query(&[
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("timezone", timezone_id),
            ("current", CURRENT_FIELDS),
            ("hourly", HOURLY_FIELDS),
            ("daily", DAILY_FIELDS),
            ("wind_speed_unit", "ms"),
            ("timeformat", "unixtime"),
            ("forecast_days", forecast_days.as_str()),
        ]);

        let response: ForecastResponse = http::get_json(request, Endpoint::Forecast).await?;
        let payload = WeatherPayload::try_from(response)?;

        tracing::info!(
            "Fetched forecast for {} ({} hourly, {} daily entries)",
            payload.timezone,
            payload.hourly.len(),
            payload.daily.len()
        );
        Ok(payload)
    }
}
