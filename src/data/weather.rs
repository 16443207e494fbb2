//! Open-Meteo forecast API client
//!
//! This module fetches current conditions, hourly and daily forecasts from the
//! Open-Meteo API and exposes the raw, index-aligned payload that the forecast
//! pipeline normalizes.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::FetchError;

/// Base URL for the Open-Meteo API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";

/// Service name used in error messages and logs
const SERVICE: &str = "forecast";

/// Request timeout for forecast calls
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Wind speed unit requested from the provider.
///
/// km/h is the canonical wind unit of the whole application; values coming
/// back are displayed as-is and never converted again.
pub const WIND_SPEED_UNIT: &str = "kmh";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,is_day,weather_code,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code,is_day,precipitation";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Open-Meteo forecast response
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// Offset of the location's time zone from UTC, in seconds
    #[serde(default)]
    pub utc_offset_seconds: i32,
    /// Current conditions
    pub current: CurrentBlock,
    /// Hourly arrays, one entry per hour
    pub hourly: HourlyBlock,
    /// Daily arrays, one entry per day
    pub daily: DailyBlock,
}

/// Current conditions from Open-Meteo
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    /// Local observation time (e.g. "2024-07-15T14:00")
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    /// 1 during daylight, 0 at night
    pub is_day: u8,
    pub weather_code: u8,
    /// Wind speed in [`WIND_SPEED_UNIT`]
    pub wind_speed_10m: f64,
}

/// Hourly forecast arrays from Open-Meteo
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyBlock {
    /// Local timestamps (e.g. "2024-07-15T14:00")
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub weather_code: Vec<u8>,
    /// 1 during daylight, 0 at night
    pub is_day: Vec<u8>,
    /// Precipitation in mm; the whole array or single entries may be missing
    #[serde(default)]
    pub precipitation: Option<Vec<Option<f64>>>,
}

/// Daily forecast arrays from Open-Meteo
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    /// Local dates (e.g. "2024-07-15")
    pub time: Vec<String>,
    pub weather_code: Vec<u8>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    /// Precipitation sum in mm; missing entries count as no precipitation
    pub precipitation_sum: Vec<Option<f64>>,
}

/// Client for fetching forecasts from the Open-Meteo API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient with default settings
    pub fn new() -> Self {
        Self::with_base_url(OPEN_METEO_BASE_URL)
    }

    /// Create a new WeatherClient against a custom base URL (mock servers in tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch current, hourly and daily forecast data for the given coordinates
    ///
    /// Times in the response are local to the location (`timezone=auto`) and
    /// wind speed is in [`WIND_SPEED_UNIT`].
    ///
    /// # Arguments
    /// * `lat` - Latitude coordinate
    /// * `lon` - Longitude coordinate
    ///
    /// # Returns
    /// * `Ok(ForecastResponse)` - The raw forecast payload
    /// * `Err(FetchError::UpstreamUnavailable)` - If the request fails, the
    ///   status is not a success, or the body cannot be decoded
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse, FetchError> {
        let url = format!("{}/v1/forecast", self.base_url);
        let latitude = lat.to_string();
        let longitude = lon.to_string();

        tracing::debug!(lat, lon, "requesting forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
                ("wind_speed_unit", WIND_SPEED_UNIT),
            ])
            .send()
            .await
            .map_err(|e| FetchError::unavailable(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "forecast service returned an error status");
            return Err(FetchError::unavailable(SERVICE, format!("status {}", status)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::unavailable(SERVICE, e))?;
        parse_forecast(&text)
    }
}

/// Decode a forecast body
fn parse_forecast(text: &str) -> Result<ForecastResponse, FetchError> {
    serde_json::from_str(text).map_err(|e| {
        tracing::warn!(error = %e, "could not decode forecast response");
        FetchError::unavailable(SERVICE, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Sample Open-Meteo response trimmed to three hours and two days
    const VALID_RESPONSE: &str = r#"{
        "latitude": 55.6,
        "longitude": 13.0,
        "generationtime_ms": 0.1,
        "utc_offset_seconds": 7200,
        "timezone": "Europe/Stockholm",
        "timezone_abbreviation": "CEST",
        "current_units": { "wind_speed_10m": "km/h" },
        "current": {
            "time": "2024-07-15T14:00",
            "interval": 900,
            "temperature_2m": 21.6,
            "relative_humidity_2m": 58,
            "is_day": 1,
            "weather_code": 2,
            "wind_speed_10m": 14.8
        },
        "hourly": {
            "time": ["2024-07-15T00:00", "2024-07-15T01:00", "2024-07-15T02:00"],
            "temperature_2m": [15.2, 14.6, 14.5],
            "weather_code": [0, 1, 61],
            "is_day": [0, 0, 0],
            "precipitation": [0.0, null, 0.4]
        },
        "daily": {
            "time": ["2024-07-15", "2024-07-16"],
            "weather_code": [61, 3],
            "temperature_2m_max": [22.4, 19.5],
            "temperature_2m_min": [13.6, 12.1],
            "precipitation_sum": [1.25, null]
        }
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let response = parse_forecast(VALID_RESPONSE).expect("Failed to parse valid response");

        assert_eq!(response.utc_offset_seconds, 7200);
        assert_eq!(response.current.time, "2024-07-15T14:00");
        assert!((response.current.temperature_2m - 21.6).abs() < 0.01);
        assert_eq!(response.current.is_day, 1);
        assert_eq!(response.current.weather_code, 2);
        assert_eq!(response.hourly.time.len(), 3);
        assert_eq!(
            response.hourly.precipitation,
            Some(vec![Some(0.0), None, Some(0.4)])
        );
        assert_eq!(response.daily.precipitation_sum, vec![Some(1.25), None]);
    }

    #[test]
    fn test_parse_without_precipitation_array() {
        let body = VALID_RESPONSE.replace(r#""precipitation": [0.0, null, 0.4]"#, r#""unused": []"#);
        let response = parse_forecast(&body).expect("precipitation is optional");
        assert!(response.hourly.precipitation.is_none());
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = parse_forecast("{ invalid json }");
        assert!(matches!(
            result,
            Err(FetchError::UpstreamUnavailable { service: "forecast", .. })
        ));
    }

    #[test]
    fn test_parse_missing_daily_block() {
        let missing_daily = r#"{
            "current": {
                "time": "2024-07-15T14:00",
                "temperature_2m": 22.5,
                "relative_humidity_2m": 65,
                "is_day": 1,
                "weather_code": 2,
                "wind_speed_10m": 12.5
            },
            "hourly": { "time": [], "temperature_2m": [], "weather_code": [], "is_day": [] }
        }"#;

        assert!(parse_forecast(missing_daily).is_err());
    }

    #[tokio::test]
    async fn test_fetch_forecast_requests_canonical_wind_unit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("wind_speed_unit", "kmh"))
            .and(query_param("timezone", "auto"))
            .and(query_param("hourly", HOURLY_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_string(VALID_RESPONSE))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::with_base_url(mock_server.uri());
        let response = client.fetch_forecast(55.6, 13.0).await.unwrap();

        assert_eq!(response.daily.time.len(), 2);
        assert!((response.current.wind_speed_10m - 14.8).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_fetch_forecast_server_error_is_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::with_base_url(mock_server.uri());
        let result = client.fetch_forecast(55.6, 13.0).await;

        assert!(matches!(
            result,
            Err(FetchError::UpstreamUnavailable { service: "forecast", .. })
        ));
    }

    #[test]
    fn test_weather_client_trims_trailing_slash() {
        let client = WeatherClient::with_base_url("http://localhost:1234/");
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
