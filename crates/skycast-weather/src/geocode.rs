//! Forward geocoding: convert a free-text place name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::http;
use crate::types::{Endpoint, GeocodeResult, WeatherError};

/// Timezone requested when the geocoder has none for a place;
/// the forecast API resolves it from the coordinates.
const FALLBACK_TIMEZONE: &str = "auto";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingPlace>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingPlace {
    latitude: f64,
    longitude: f64,
    name: String,
    country: Option<String>,
    timezone: Option<String>,
}

impl From<GeocodingPlace> for GeocodeResult {
    fn from(place: GeocodingPlace) -> Self {
        Self {
            latitude: place.latitude,
            longitude: place.longitude,
            display_name: place.name,
            country: place.country.unwrap_or_default(),
            timezone_id: place
                .timezone
                .filter(|tz| !tz.is_empty())
                .unwrap_or_else(|| FALLBACK_TIMEZONE.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Arc<Client>,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: impl Into<String>) -> Result<Self, WeatherError> {
        let client = http::build_client().map_err(|source| WeatherError::Network {
            endpoint: Endpoint::Geocoding,
            source,
        })?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into(),
        })
    }

    /// Resolve a place name to its best-ranked match.
    ///
    /// Fails with `EmptyQuery` before touching the network when the name is
    /// blank, and with `LocationNotFound` when the API returns no candidates.
    #[instrument(skip(self), level = "info")]
    pub async fn geocode(&self, place_name: &str) -> Result<GeocodeResult, WeatherError> {
        let name = place_name.trim();
        if name.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }

        tracing::debug!("Geocoding {:?} via {}", name, self.base_url);

        let request = self.client.get(&self.base_url).query(&[
            ("name", name),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ]);

        let body: GeocodingResponse = http::get_json(request, Endpoint::Geocoding).await?;

        let place = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::LocationNotFound(name.to_string()))?;

        let result = GeocodeResult::from(place);
        tracing::info!(
            "Geocoded {:?} to {}, {} ({:.4}, {:.4})",
            name,
            result.display_name,
            result.country,
            result.latitude,
            result.longitude
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn london() -> serde_json::Value {
        serde_json::json!({
            "results": [{
                "id": 2643743,
                "name": "London",
                "latitude": 51.50853,
                "longitude": -0.12574,
                "country": "United Kingdom",
                "timezone": "Europe/London"
            }],
            "generationtime_ms": 0.5
        })
    }

    #[tokio::test]
    async fn test_geocode_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "London"))
            .and(query_param("count", "1"))
            .and(query_param("language", "en"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let geocoder = Geocoder::new(format!("{}/v1/search", mock_server.uri())).unwrap();
        let result = geocoder.geocode("  London ").await.unwrap();

        assert_eq!(result.display_name, "London");
        assert_eq!(result.country, "United Kingdom");
        assert_eq!(result.timezone_id, "Europe/London");
        assert!((result.latitude - 51.50853).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_geocode_encodes_multi_word_names() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("name", "São Paulo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "name": "São Paulo",
                    "latitude": -23.5475,
                    "longitude": -46.63611,
                    "country": "Brazil",
                    "timezone": "America/Sao_Paulo"
                }]
            })))
            .mount(&mock_server)
            .await;

        let geocoder = Geocoder::new(mock_server.uri()).unwrap();
        let result = geocoder.geocode("São Paulo").await.unwrap();
        assert_eq!(result.country, "Brazil");
    }

    #[tokio::test]
    async fn test_geocode_empty_results() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
            )
            .mount(&mock_server)
            .await;

        let geocoder = Geocoder::new(mock_server.uri()).unwrap();
        let result = geocoder.geocode("Atlantis").await;

        assert!(matches!(result, Err(WeatherError::LocationNotFound(ref n)) if n == "Atlantis"));
    }

    #[tokio::test]
    async fn test_geocode_missing_results_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "generationtime_ms": 0.2 })),
            )
            .mount(&mock_server)
            .await;

        let geocoder = Geocoder::new(mock_server.uri()).unwrap();
        let result = geocoder.geocode("Nowhere").await;

        assert!(matches!(result, Err(WeatherError::LocationNotFound(_))));
    }

    #[tokio::test]
    async fn test_geocode_blank_name_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let geocoder = Geocoder::new(mock_server.uri()).unwrap();
        assert!(matches!(
            geocoder.geocode("   ").await,
            Err(WeatherError::EmptyQuery)
        ));
        assert!(matches!(geocoder.geocode("").await, Err(WeatherError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_geocode_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let geocoder = Geocoder::new(mock_server.uri()).unwrap();
        let result = geocoder.geocode("London").await;

        assert!(matches!(
            result,
            Err(WeatherError::Http {
                endpoint: Endpoint::Geocoding,
                status: 503
            })
        ));
    }

    #[tokio::test]
    async fn test_geocode_malformed_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let geocoder = Geocoder::new(mock_server.uri()).unwrap();
        let result = geocoder.geocode("London").await;

        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }

    #[tokio::test]
    async fn test_geocode_connection_refused() {
        // Nothing listens on port 9 on test machines
        let geocoder = Geocoder::new("http://127.0.0.1:9/v1/search").unwrap();
        let result = geocoder.geocode("London").await;

        assert!(matches!(
            result,
            Err(WeatherError::Network {
                endpoint: Endpoint::Geocoding,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_country_and_timezone() {
        let place = GeocodingPlace {
            latitude: 0.0,
            longitude: 0.0,
            name: "Null Island".to_string(),
            country: None,
            timezone: None,
        };
        let result = GeocodeResult::from(place);
        assert_eq!(result.country, "");
        assert_eq!(result.timezone_id, "auto");
    }
}
