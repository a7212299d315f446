//! Plain-text rendering of the weather screen for terminals.

use std::fmt::{self, Write as _};
use std::io::Write as _;

use crate::models::{SearchPhase, ViewState, WeatherView};
use crate::sink::ViewSink;

const EMPTY_STATE: &str = "Search for a city to see the weather.";
const FORECAST_UNAVAILABLE: &str = "Forecast unavailable";

/// Render the whole screen as text.
pub fn render_text(view: &ViewState) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_screen(&mut out, view);
    out
}

fn write_screen(out: &mut String, view: &ViewState) -> fmt::Result {
    if view.loading {
        writeln!(out, "Loading...")?;
    }

    if let Some(message) = &view.error_message {
        writeln!(out, "! {}", message)?;
    }

    match &view.weather {
        Some(weather) => write_weather(out, weather),
        None if view.show_empty_state && view.phase != SearchPhase::Searching => {
            writeln!(out, "{}", EMPTY_STATE)
        }
        None => Ok(()),
    }
}

fn write_weather(out: &mut String, w: &WeatherView) -> fmt::Result {
    writeln!(out, "{}", w.city_label)?;
    writeln!(out, "{}", w.date_label)?;
    writeln!(out)?;
    writeln!(out, "  {}°C  {}", w.temperature, w.description)?;
    writeln!(out, "  {}", w.feels_like)?;
    writeln!(out, "  Icon: {}", w.icon_url)?;
    writeln!(out)?;
    writeln!(out, "  Humidity     {}", w.humidity)?;
    writeln!(out, "  Wind         {} {}", w.wind_speed, w.wind_direction)?;
    writeln!(out, "  Pressure     {}", w.pressure)?;
    writeln!(out, "  Visibility   {}", w.visibility)?;
    writeln!(out, "  Cloud cover  {}", w.cloud_cover)?;
    if let (Some(rise), Some(set)) = (&w.sunrise, &w.sunset) {
        writeln!(out, "  Sun          {} / {}", rise, set)?;
    }
    writeln!(
        out,
        "  Location     {}, {} ({})",
        w.latitude, w.longitude, w.timezone
    )?;

    if !w.hourly.is_empty() {
        writeln!(out)?;
        writeln!(out, "Next hours")?;
        for hour in &w.hourly {
            writeln!(
                out,
                "  {:<9} {:>4}°  {}",
                hour.time_label, hour.temperature, hour.description
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Forecast")?;
    if w.forecast_unavailable {
        writeln!(out, "  {}", FORECAST_UNAVAILABLE)?;
    }
    for day in &w.forecast {
        writeln!(
            out,
            "  {} {:<7} {:>4}° / {:>4}°  {}",
            day.day_label, day.date_label, day.high, day.low, day.description
        )?;
    }

    Ok(())
}

/// Writes each rendered view to stdout.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl ViewSink for TerminalSink {
    fn render(&self, view: &ViewState) {
        let text = render_text(view);
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", text).and_then(|_| stdout.flush()) {
            tracing::warn!("Failed to write view to stdout: {}", e);
        }
    }
}
