//! Forward geocoding: turn a searched place name into coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::FetchError;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("crabby/", env!("CARGO_PKG_VERSION"));
const SERVICE: &str = "geocoding";

/// A geocoded place
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub latitude: f64,
    pub longitude: f64,
    /// Full name as reported by Nominatim (e.g. "Malmö, Skåne län, Sverige")
    pub display_name: String,
}

impl Place {
    /// Short name for headings: the first comma-separated part of the display name
    pub fn short_name(&self) -> &str {
        short_name(&self.display_name)
    }
}

/// Returns the first comma-separated component of a display name, trimmed
pub fn short_name(display_name: &str) -> &str {
    display_name.split(',').next().unwrap_or_default().trim()
}

/// Nominatim encodes coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl TryFrom<NominatimPlace> for Place {
    type Error = FetchError;

    fn try_from(raw: NominatimPlace) -> Result<Self, Self::Error> {
        let latitude = raw
            .lat
            .trim()
            .parse::<f64>()
            .map_err(|_| FetchError::unavailable(SERVICE, format!("invalid latitude {:?}", raw.lat)))?;
        let longitude = raw
            .lon
            .trim()
            .parse::<f64>()
            .map_err(|_| FetchError::unavailable(SERVICE, format!("invalid longitude {:?}", raw.lon)))?;

        Ok(Place {
            latitude,
            longitude,
            display_name: raw.display_name,
        })
    }
}

/// Client for the Nominatim search endpoint
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingClient {
    /// Creates a client against the public Nominatim instance
    pub fn new() -> Self {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Creates a client against a custom base URL (mock servers in tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Searches for places matching `query`.
    ///
    /// An empty result is not an error here; see [`GeocodingClient::locate`].
    pub async fn search(&self, query: &str) -> Result<Vec<Place>, FetchError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Geocode request failed: {}", e);
                FetchError::unavailable(SERVICE, e)
            })?;

        if !response.status().is_success() {
            tracing::debug!("Geocode returned status {}", response.status());
            return Err(FetchError::unavailable(
                SERVICE,
                format!("status {}", response.status()),
            ));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            tracing::debug!("Geocode parse error: {}", e);
            FetchError::unavailable(SERVICE, e)
        })?;

        places.into_iter().map(Place::try_from).collect()
    }

    /// Resolves `query` to its best match.
    ///
    /// # Returns
    /// * `Ok(Place)` - The first place Nominatim returned
    /// * `Err(FetchError::LocationNotFound)` - If nothing matched
    /// * `Err(FetchError::UpstreamUnavailable)` - If the lookup itself failed
    pub async fn locate(&self, query: &str) -> Result<Place, FetchError> {
        let place = self
            .search(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::LocationNotFound(query.to_string()))?;

        tracing::info!("Geocoded {:?} to {}", query, place.display_name);
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_locate_returns_first_place() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Malmö"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "place_id": 1,
                    "lat": "55.6052931",
                    "lon": "13.0001566",
                    "display_name": "Malmö, Skåne län, Sverige"
                }
            ])))
            .mount(&mock_server)
            .await;

        let client = GeocodingClient::with_base_url(mock_server.uri());
        let place = client.locate("Malmö").await.unwrap();

        assert!((place.latitude - 55.6052931).abs() < 1e-6);
        assert!((place.longitude - 13.0001566).abs() < 1e-6);
        assert_eq!(place.short_name(), "Malmö");
    }

    #[tokio::test]
    async fn test_empty_result_is_location_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let client = GeocodingClient::with_base_url(mock_server.uri());

        let places = client.search("Nowhere").await.unwrap();
        assert!(places.is_empty());

        let result = client.locate("Nowhere").await;
        match result {
            Err(FetchError::LocationNotFound(name)) => assert_eq!(name, "Nowhere"),
            other => panic!("Expected LocationNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = GeocodingClient::with_base_url(mock_server.uri());
        let result = client.locate("Malmö").await;

        assert!(matches!(
            result,
            Err(FetchError::UpstreamUnavailable { service: "geocoding", .. })
        ));
    }

    #[tokio::test]
    async fn test_bad_coordinates_are_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "lat": "north", "lon": "13.0", "display_name": "Somewhere" }
            ])))
            .mount(&mock_server)
            .await;

        let client = GeocodingClient::with_base_url(mock_server.uri());
        assert!(client.locate("Somewhere").await.is_err());
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("Malmö, Skåne län, Sverige"), "Malmö");
        assert_eq!(short_name("  Lund  "), "Lund");
        assert_eq!(short_name(""), "");
    }
}
