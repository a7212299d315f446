//! Centralized error types for the SkyCast application.
//!
//! This module provides a typed error hierarchy that:
//! - Classifies every failure into one of four kinds shown to the user
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Coarse classification of a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input, rejected before any request
    Validation,
    /// The geocoder had no match for the place name
    NotFound,
    /// Transport failure or non-2xx status from an upstream API
    Network,
    /// Anything else, e.g. a malformed response body
    Unexpected,
}

/// Top-level application error type.
///
/// All errors in the SkyCast application should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Weather(e) => e.kind(),
            AppError::Other(_) => ErrorKind::Unexpected,
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

/// Weather search errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Place name is empty")]
    EmptyQuery,

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Geocoding failed: {0}")]
    GeocodingFailed(#[source] NetworkError),

    #[error("Forecast request failed: {0}")]
    ForecastFailed(#[source] NetworkError),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::EmptyQuery => "Please enter a city name",
            WeatherError::LocationNotFound(_) => {
                "City not found. Please check the spelling and try again."
            }
            WeatherError::GeocodingFailed(_) => "Failed to find city. Please try again.",
            WeatherError::ForecastFailed(_) => "Failed to fetch weather data. Please try again.",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::EmptyQuery => ErrorKind::Validation,
            WeatherError::LocationNotFound(_) => ErrorKind::NotFound,
            WeatherError::GeocodingFailed(_) | WeatherError::ForecastFailed(_) => {
                ErrorKind::Network
            }
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
