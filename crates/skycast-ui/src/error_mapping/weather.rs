use skycast_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};
use skycast_weather::{Endpoint, WeatherError as LookupError};

/// Map a lookup failure to the application error shown to the user.
pub fn to_app_error(e: LookupError) -> AppError {
    match e {
        LookupError::EmptyQuery => AppError::Weather(WeatherError::EmptyQuery),
        LookupError::LocationNotFound(name) => {
            AppError::Weather(WeatherError::LocationNotFound(name))
        }
        LookupError::Http { endpoint, status } => failed_at(
            endpoint,
            NetworkError::ServerError {
                status,
                message: format!("{} endpoint returned {}", endpoint, status),
            },
        ),
        LookupError::Network { endpoint, source } => {
            failed_at(endpoint, source.into_network_error())
        }
        LookupError::Parse(msg) => AppError::Other(anyhow::anyhow!("Malformed response: {}", msg)),
    }
}

/// Upstream failures keep the endpoint so the user sees which step failed.
fn failed_at(endpoint: Endpoint, network: NetworkError) -> AppError {
    match endpoint {
        Endpoint::Geocoding => AppError::Weather(WeatherError::GeocodingFailed(network)),
        Endpoint::Forecast => AppError::Weather(WeatherError::ForecastFailed(network)),
    }
}
