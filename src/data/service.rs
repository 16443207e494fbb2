//! Forecast loading
//!
//! Chains the geocoding lookup and the forecast request, then builds the
//! snapshot. The two calls run one after the other; the forecast needs the
//! coordinates from the first.

use super::{FetchError, GeocodingClient, WeatherClient};
use crate::forecast::ForecastSnapshot;

/// Loads complete forecast snapshots for searched place names
#[derive(Debug, Clone, Default)]
pub struct ForecastService {
    geocoder: GeocodingClient,
    weather: WeatherClient,
}

impl ForecastService {
    /// Creates a service against the public upstream APIs
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service from explicit clients (custom base URLs in tests)
    pub fn with_clients(geocoder: GeocodingClient, weather: WeatherClient) -> Self {
        Self { geocoder, weather }
    }

    /// Resolves `query` and loads its forecast.
    ///
    /// # Returns
    /// * `Ok(ForecastSnapshot)` - The complete snapshot
    /// * `Err(FetchError)` - The first failure; nothing partial is returned
    pub async fn load(&self, query: &str) -> Result<ForecastSnapshot, FetchError> {
        tracing::info!("Loading forecast for {:?}", query);

        let place = self.geocoder.locate(query).await?;
        let response = self
            .weather
            .fetch_forecast(place.latitude, place.longitude)
            .await?;

        let snapshot = ForecastSnapshot::build(&place.display_name, &response).map_err(|e| {
            tracing::error!("Forecast for {} was malformed: {}", place.display_name, e);
            FetchError::from(e)
        })?;

        tracing::info!(
            "Loaded forecast for {} ({} days, {} hours)",
            snapshot.location,
            snapshot.daily.len(),
            snapshot.hourly.len()
        );
        Ok(snapshot)
    }
}
