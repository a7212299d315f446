pub mod weather_view;

pub use weather_view::{
    build_weather_view, ForecastCard, HourlyCard, SearchPhase, ViewState, WeatherView,
    FORECAST_CARD_COUNT, HOURLY_CARD_COUNT,
};
