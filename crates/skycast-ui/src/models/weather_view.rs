//! View model for the weather screen.
//!
//! `ViewState` is the only thing a renderer ever sees. It is rebuilt by the
//! search orchestrator and pushed to a `ViewSink` on every change.

use serde::Serialize;
use skycast_weather::present::{
    format_local_date, format_local_time, format_month_day, format_temperature, format_weekday,
    icon_url, weather_description, weather_icon_id, wind_compass_label,
};
use skycast_weather::{GeocodeResult, WeatherPayload};

/// Days shown in the forecast strip (today excluded)
pub const FORECAST_CARD_COUNT: usize = 5;

/// Hours shown in the next-hours strip
pub const HOURLY_CARD_COUNT: usize = 6;

/// Where the latest search is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub phase: SearchPhase,
    pub loading: bool,
    pub error_message: Option<String>,
    /// Placeholder shown until the first successful search
    pub show_empty_state: bool,
    pub weather: Option<WeatherView>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: SearchPhase::Idle,
            loading: false,
            error_message: None,
            show_empty_state: true,
            weather: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    /// "London, United Kingdom"
    pub city_label: String,
    pub date_label: String,
    /// Whole degrees Celsius, no unit
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub icon_url: String,
    pub humidity: String,
    pub wind_speed: String,
    /// "WSW (250°)"
    pub wind_direction: String,
    pub pressure: String,
    pub visibility: String,
    pub cloud_cover: String,
    pub cloud_cover_pct: i32,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub latitude: String,
    pub longitude: String,
    pub timezone: String,
    pub hourly: Vec<HourlyCard>,
    pub forecast: Vec<ForecastCard>,
    /// No upcoming days in the payload; show a notice instead of cards
    pub forecast_unavailable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyCard {
    pub time_label: String,
    pub temperature: String,
    pub icon_url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub day_label: String,
    pub date_label: String,
    pub icon_url: String,
    pub description: String,
    pub high: String,
    pub low: String,
}

fn city_label(place: &GeocodeResult) -> String {
    if place.country.is_empty() {
        place.display_name.clone()
    } else {
        format!("{}, {}", place.display_name, place.country)
    }
}

/// Build the rendered weather fields from a geocode match and its forecast.
pub fn build_weather_view(
    place: &GeocodeResult,
    payload: &WeatherPayload,
    icon_base_url: &str,
) -> WeatherView {
    let current = &payload.current;
    let offset = payload.utc_offset_seconds;
    let icon = |code: i32, is_day: bool| icon_url(icon_base_url, &weather_icon_id(code, is_day));

    let today = payload.today();
    let sunrise = today
        .and_then(|d| d.sunrise)
        .map(|t| format_local_time(t, offset));
    let sunset = today
        .and_then(|d| d.sunset)
        .map(|t| format_local_time(t, offset));

    // Floor to the local hour; some offsets are not whole hours
    let local_now = current.time + i64::from(offset);
    let hour_start = local_now - local_now.rem_euclid(3600) - i64::from(offset);
    let hourly = payload
        .hourly
        .iter()
        .filter(|h| h.time >= hour_start)
        .take(HOURLY_CARD_COUNT)
        .map(|h| HourlyCard {
            time_label: format_local_time(h.time, offset),
            temperature: format_temperature(h.temperature_c),
            icon_url: icon(h.weather_code, true),
            description: weather_description(h.weather_code).to_string(),
        })
        .collect();

    let forecast: Vec<ForecastCard> = payload
        .upcoming_days(FORECAST_CARD_COUNT)
        .iter()
        .map(|day| ForecastCard {
            day_label: format_weekday(day.date),
            date_label: format_month_day(day.date),
            icon_url: icon(day.weather_code, true),
            description: weather_description(day.weather_code).to_string(),
            high: format_temperature(day.temp_max_c),
            low: format_temperature(day.temp_min_c),
        })
        .collect();

    WeatherView {
        city_label: city_label(place),
        date_label: format_local_date(current.time, offset),
        temperature: format_temperature(current.temperature_c),
        description: weather_description(current.weather_code).to_string(),
        feels_like: format!("Feels like {}°C", format_temperature(current.feels_like_c)),
        icon_url: icon(current.weather_code, current.is_daytime),
        humidity: format!("{}%", current.humidity_pct),
        wind_speed: format!("{:.1} m/s", current.wind_speed_ms),
        wind_direction: format!(
            "{} ({}°)",
            wind_compass_label(f64::from(current.wind_direction_deg)),
            current.wind_direction_deg
        ),
        pressure: format!("{} hPa", format_temperature(current.pressure_hpa)),
        visibility: format!("{:.1} km", current.visibility_m / 1000.0),
        cloud_cover: format!("{}%", current.cloud_cover_pct),
        cloud_cover_pct: current.cloud_cover_pct.clamp(0, 100),
        sunrise,
        sunset,
        latitude: format!("{:.4}", place.latitude),
        longitude: format!("{:.4}", place.longitude),
        timezone: place.timezone_id.clone(),
        hourly,
        forecast_unavailable: forecast.is_empty(),
        forecast,
    }
}
