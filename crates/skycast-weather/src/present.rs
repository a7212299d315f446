//! Pure formatting helpers that turn raw weather values into display labels.
//!
//! Every function here is total: out-of-table codes and odd angles map to
//! fixed defaults instead of failing. Times are always shifted by an explicit
//! UTC offset, so output never depends on the host machine's timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::codes::{self, DEFAULT_ICON, UNKNOWN_DESCRIPTION};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Map a wind direction in degrees to one of 16 compass points.
pub fn wind_compass_label(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    // NaN saturates to bucket 0
    let bucket = (normalized / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[bucket]
}

/// Description for a WMO code, "Unknown" if the code is not in the table.
pub fn weather_description(code: i32) -> &'static str {
    codes::lookup(code)
        .map(|c| c.description)
        .unwrap_or(UNKNOWN_DESCRIPTION)
}

/// Icon id with day/night suffix, e.g. "01d" or "10n".
pub fn weather_icon_id(code: i32, is_daytime: bool) -> String {
    let icon = codes::lookup(code).map(|c| c.icon).unwrap_or(DEFAULT_ICON);
    let suffix = if is_daytime { 'd' } else { 'n' };
    format!("{}{}", icon, suffix)
}

/// Full image URL for an icon id
pub fn icon_url(base_url: &str, icon_id: &str) -> String {
    format!("{}/{}@4x.png", base_url.trim_end_matches('/'), icon_id)
}

fn local_datetime(epoch_seconds: i64, utc_offset_seconds: i32) -> Option<NaiveDateTime> {
    let shifted = epoch_seconds.checked_add(i64::from(utc_offset_seconds))?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.naive_utc())
}

/// 12-hour clock time at the given offset, e.g. "06:30 AM".
pub fn format_local_time(epoch_seconds: i64, utc_offset_seconds: i32) -> String {
    local_datetime(epoch_seconds, utc_offset_seconds)
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Calendar date at the given offset, e.g. "Mon, Jan 1, 2024".
pub fn format_local_date(epoch_seconds: i64, utc_offset_seconds: i32) -> String {
    local_datetime(epoch_seconds, utc_offset_seconds)
        .map(|dt| format_date(dt.date()))
        .unwrap_or_default()
}

/// Local calendar date for an epoch timestamp
pub fn local_date(epoch_seconds: i64, utc_offset_seconds: i32) -> Option<NaiveDate> {
    local_datetime(epoch_seconds, utc_offset_seconds).map(|dt| dt.date())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Short weekday, e.g. "Tue"
pub fn format_weekday(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Short month and day, e.g. "Jan 2"
pub fn format_month_day(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Whole degrees, halves rounded up (-0.5 becomes 0, 2.5 becomes 3).
pub fn format_temperature(celsius: f64) -> String {
    let rounded = (celsius + 0.5).floor() as i64;
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-01T12:00:00Z, a Monday
    const NOON_JAN_1: i64 = 1_704_110_400;

    #[test]
    fn test_compass_cardinal_points() {
        assert_eq!(wind_compass_label(0.0), "N");
        assert_eq!(wind_compass_label(90.0), "E");
        assert_eq!(wind_compass_label(180.0), "S");
        assert_eq!(wind_compass_label(270.0), "W");
        assert_eq!(wind_compass_label(360.0), "N");
    }

    #[test]
    fn test_compass_intermediate_points() {
        assert_eq!(wind_compass_label(22.5), "NNE");
        assert_eq!(wind_compass_label(45.0), "NE");
        assert_eq!(wind_compass_label(250.0), "WSW");
        assert_eq!(wind_compass_label(337.5), "NNW");
        assert_eq!(wind_compass_label(350.0), "N");
    }

    #[test]
    fn test_compass_bucket_boundary_rounds_up() {
        assert_eq!(wind_compass_label(11.0), "N");
        assert_eq!(wind_compass_label(11.25), "NNE");
    }

    #[test]
    fn test_compass_is_periodic() {
        for d in [0.0, 10.0, 45.0, 123.0, 200.0, 290.0, 359.0] {
            for k in [-3i32, -1, 1, 2, 5] {
                let shifted = d + 360.0 * f64::from(k);
                assert_eq!(
                    wind_compass_label(d),
                    wind_compass_label(shifted),
                    "degrees {} vs {}",
                    d,
                    shifted
                );
            }
        }
    }

    #[test]
    fn test_compass_negative_and_nan() {
        assert_eq!(wind_compass_label(-90.0), "W");
        assert_eq!(wind_compass_label(f64::NAN), "N");
    }

    #[test]
    fn test_description_known_codes() {
        assert_eq!(weather_description(0), "Clear sky");
        assert_eq!(weather_description(3), "Overcast");
        assert_eq!(weather_description(63), "Moderate rain");
        assert_eq!(weather_description(95), "Thunderstorm");
    }

    #[test]
    fn test_description_unknown_codes() {
        for code in [-1, 4, 42, 100, 1000] {
            assert_eq!(weather_description(code), "Unknown");
        }
    }

    #[test]
    fn test_icon_day_night_suffix() {
        assert_eq!(weather_icon_id(0, true), "01d");
        assert_eq!(weather_icon_id(0, false), "01n");
        assert_eq!(weather_icon_id(61, true), "10d");
        assert_eq!(weather_icon_id(45, false), "50n");
    }

    #[test]
    fn test_icon_unknown_defaults_to_overcast() {
        for code in [-1, 4, 42, 100] {
            assert_eq!(weather_icon_id(code, true), "04d");
            assert_eq!(weather_icon_id(code, false), "04n");
        }
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("https://openweathermap.org/img/wn", "01d"),
            "https://openweathermap.org/img/wn/01d@4x.png"
        );
        assert_eq!(
            icon_url("https://openweathermap.org/img/wn/", "10n"),
            "https://openweathermap.org/img/wn/10n@4x.png"
        );
    }

    #[test]
    fn test_format_local_time() {
        assert_eq!(format_local_time(NOON_JAN_1, 0), "12:00 PM");
        assert_eq!(format_local_time(NOON_JAN_1, -5 * 3600), "07:00 AM");
        assert_eq!(format_local_time(NOON_JAN_1, 5 * 3600 + 1800), "05:30 PM");
        assert_eq!(format_local_time(NOON_JAN_1 - 12 * 3600, 0), "12:00 AM");
    }

    #[test]
    fn test_format_local_time_is_stable() {
        let first = format_local_time(NOON_JAN_1, 3600);
        let second = format_local_time(NOON_JAN_1, 3600);
        assert_eq!(first, second);
        assert_eq!(first, "01:00 PM");
    }

    #[test]
    fn test_format_local_date() {
        assert_eq!(format_local_date(NOON_JAN_1, 0), "Mon, Jan 1, 2024");
        // Crosses midnight eastwards
        assert_eq!(format_local_date(NOON_JAN_1, 13 * 3600), "Tue, Jan 2, 2024");
        // And westwards
        assert_eq!(format_local_date(NOON_JAN_1, -13 * 3600), "Sun, Dec 31, 2023");
    }

    #[test]
    fn test_format_out_of_range_timestamp() {
        assert_eq!(format_local_time(i64::MAX, 3600), "--:--");
        assert_eq!(format_local_date(i64::MAX, 3600), "");
    }

    #[test]
    fn test_format_short_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(format_weekday(date), "Tue");
        assert_eq!(format_month_day(date), "Jan 2");
        assert_eq!(format_date(date), "Tue, Jan 2, 2024");
    }

    #[test]
    fn test_local_date() {
        assert_eq!(
            local_date(NOON_JAN_1, 13 * 3600),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
    }

    #[test]
    fn test_format_temperature_rounding() {
        assert_eq!(format_temperature(12.4), "12");
        assert_eq!(format_temperature(12.5), "13");
        assert_eq!(format_temperature(-0.4), "0");
        assert_eq!(format_temperature(-0.5), "0");
        assert_eq!(format_temperature(-3.6), "-4");
    }
}
