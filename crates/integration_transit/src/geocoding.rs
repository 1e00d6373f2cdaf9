//! Nominatim geocoding client
//!
//! Resolves free-text place queries to coordinates and a formatted address
//! using the [Nominatim](https://nominatim.openstreetmap.org) API
//! (OpenStreetMap).
//!
//! Implements rate limiting (max 1 request/second per Nominatim usage policy)
//! and result caching (24h TTL) to minimize API calls.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            ..Default::default()
        }
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Query could not be resolved to a place
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Returns true when the failure means "nothing matched" rather than
    /// "the lookup broke"
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PlaceNotFound(_))
    }
}

/// A geocoded place: coordinates plus the formatted address
///
/// The last comma-separated segment of `display_name` is the country,
/// which the resolver layer extracts for coverage classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Formatted address, most-specific component first
    pub display_name: String,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a free-text query to the best-matching place
    async fn search(&self, query: &str) -> Result<Place, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Cache<String, Place>,
    last_request: Arc<Mutex<Instant>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("RailScout/0.3 (https://github.com/twohreichel/railscout)")
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache_ttl = if config.cache_ttl_hours > 0 {
            Duration::from_secs(config.cache_ttl_hours * 3600)
        } else {
            Duration::from_secs(1) // Minimal TTL when "disabled"
        };

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(Instant::now() - Duration::from_secs(2))),
        })
    }

    /// Enforce Nominatim's rate limit (max 1 request per second)
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < Duration::from_millis(1100) {
            let wait = Duration::from_millis(1100).saturating_sub(elapsed);
            debug!(?wait, "Rate limiting geocoding request");
            tokio::time::sleep(wait).await;
        }
        *last = Instant::now();
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Place, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodingError::PlaceNotFound(
                "Query must not be empty".to_string(),
            ));
        }

        // Check cache first
        let cache_key = query.to_lowercase();
        if let Some(place) = self.cache.get(&cache_key).await {
            debug!(%query, "Geocoding cache hit");
            return Ok(place);
        }

        self.rate_limit().await;

        let url = format!("{}/search", self.config.base_url);
        let params = [
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
            ("accept-language", "en".to_string()),
        ];

        debug!(%query, "Geocoding place");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::PlaceNotFound(query.to_string()))?;

        let latitude: f64 = result
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid latitude".to_string()))?;
        let longitude: f64 = result
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid longitude".to_string()))?;

        let place = Place {
            latitude,
            longitude,
            display_name: result.display_name.unwrap_or_default(),
        };

        // Cache the result
        self.cache.insert(cache_key, place.clone()).await;
        debug!(%query, %latitude, %longitude, "Geocoded place");

        Ok(place)
    }
}

/// Raw Nominatim API response
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominatim_config_default() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.cache_ttl_hours, 24);
    }

    #[test]
    fn test_nominatim_config_for_testing() {
        let config = NominatimConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.cache_ttl_hours, 0);
    }

    #[test]
    fn test_geocoding_error_display() {
        let err = GeocodingError::PlaceNotFound("Atlantis".to_string());
        assert!(err.to_string().contains("Atlantis"));
        assert!(err.is_not_found());

        let err = GeocodingError::Timeout;
        assert!(err.to_string().contains("timed out"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_nominatim_result_parsing() {
        let json = r#"[{
            "lat": "47.3769",
            "lon": "8.5417",
            "display_name": "Zürich, Bezirk Zürich, Zürich, Schweiz/Suisse/Svizzera/Svizra"
        }]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lat, "47.3769");
        assert!(
            results[0]
                .display_name
                .as_deref()
                .unwrap()
                .ends_with("Schweiz/Suisse/Svizzera/Svizra")
        );
    }

    #[test]
    fn test_nominatim_empty_result() {
        let json = r"[]";
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_nominatim_config_serialization() {
        let config = NominatimConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: NominatimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.base_url, config.base_url);
        assert_eq!(deserialized.cache_ttl_hours, config.cache_ttl_hours);
    }
}
