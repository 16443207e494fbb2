//! Upstream data sources for Crabby Weather
//!
//! This module contains the geocoding and forecast API clients, the error
//! taxonomy shared by every fetch, and the service that chains both calls
//! into a forecast snapshot.

pub mod geocode;
pub mod service;
pub mod weather;

pub use geocode::{GeocodingClient, Place};
pub use service::ForecastService;
pub use weather::{
    CurrentBlock, DailyBlock, ForecastResponse, HourlyBlock, WeatherClient, WIND_SPEED_UNIT,
};

use thiserror::Error;

use crate::forecast::DataShapeError;

/// Errors that end a forecast fetch.
///
/// Each variant is shown to the user as a single message in place of the
/// forecast; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The geocoder returned no places for the searched name
    #[error("Location \"{0}\" was not found")]
    LocationNotFound(String),

    /// An upstream call failed, returned a non-success status, or sent a body
    /// that could not be decoded
    #[error("Could not reach the {service} service")]
    UpstreamUnavailable {
        /// Which upstream failed ("geocoding" or "forecast")
        service: &'static str,
        /// Underlying cause, kept for logs
        reason: String,
    },

    /// The forecast arrays did not line up
    #[error("The forecast data was malformed: {0}")]
    DataShape(#[from] DataShapeError),
}

impl FetchError {
    /// Builds an `UpstreamUnavailable` error for the named service
    pub fn unavailable(service: &'static str, reason: impl std::fmt::Display) -> Self {
        FetchError::UpstreamUnavailable {
            service,
            reason: reason.to_string(),
        }
    }
}
