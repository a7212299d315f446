//! WMO weather interpretation codes.
//! See: https://open-meteo.com/en/docs#weathervariables

use std::collections::HashMap;
use std::sync::LazyLock;

/// Description returned for codes missing from the table
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Icon used for codes missing from the table ("overcast")
pub const DEFAULT_ICON: &str = "04";

/// Human-readable label and icon for one WMO code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCode {
    pub description: &'static str,
    /// Icon id without the day/night suffix
    pub icon: &'static str,
}

const ENTRIES: &[(i32, &str, &str)] = &[
    (0, "Clear sky", "01"),
    (1, "Mainly clear", "02"),
    (2, "Partly cloudy", "03"),
    (3, "Overcast", "04"),
    (45, "Foggy", "50"),
    (48, "Foggy", "50"),
    (51, "Light drizzle", "09"),
    (53, "Moderate drizzle", "09"),
    (55, "Dense drizzle", "09"),
    (56, "Light freezing drizzle", "09"),
    (57, "Dense freezing drizzle", "09"),
    (61, "Slight rain", "10"),
    (63, "Moderate rain", "10"),
    (65, "Heavy rain", "10"),
    (66, "Light freezing rain", "13"),
    (67, "Heavy freezing rain", "13"),
    (71, "Slight snow", "13"),
    (73, "Moderate snow", "13"),
    (75, "Heavy snow", "13"),
    (77, "Snow grains", "13"),
    (80, "Slight rain showers", "10"),
    (81, "Moderate rain showers", "10"),
    // WMO 82 is "violent", not a second "moderate" (that is 81)
    (82, "Violent rain showers", "10"),
    (85, "Slight snow showers", "13"),
    (86, "Heavy snow showers", "13"),
    (95, "Thunderstorm", "11"),
    (96, "Thunderstorm with hail", "11"),
    (99, "Thunderstorm with large hail", "11"),
];

static TABLE: LazyLock<HashMap<i32, WeatherCode>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .map(|&(code, description, icon)| (code, WeatherCode { description, icon }))
        .collect()
});

/// Look up a WMO code
pub fn lookup(code: i32) -> Option<&'static WeatherCode> {
    TABLE.get(&code)
}
