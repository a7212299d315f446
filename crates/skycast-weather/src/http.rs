use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::types::{Endpoint, WeatherError};

const USER_AGENT: &str = concat!("SkyCast/", env!("CARGO_PKG_VERSION"));

/// Shared client construction. No request timeout is set; reqwest's default applies.
pub(crate) fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
}

/// Send a GET, reject non-2xx statuses and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    endpoint: Endpoint,
) -> Result<T, WeatherError> {
    let response = request
        .send()
        .await
        .map_err(|source| WeatherError::Network { endpoint, source })?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("{} returned status {}", endpoint, status);
        return Err(WeatherError::Http {
            endpoint,
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| WeatherError::Network { endpoint, source })?;

    serde_json::from_str(&body)
        .map_err(|e| WeatherError::Parse(format!("{} response: {}", endpoint, e)))
}
