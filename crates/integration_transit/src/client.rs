//! transport.opendata.ch API client
//!
//! Provides station search and direct-connection queries against the
//! public [transport.opendata.ch](https://transport.opendata.ch) API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::{
    Connection, RawConnection, RawConnectionsResponse, RawLocationsResponse, Station,
};

/// Fields requested from the connections endpoint; everything else is
/// excluded from the payload
const CONNECTION_FIELDS: [&str; 6] = [
    "connections/from/departure",
    "connections/to/arrival",
    "connections/duration",
    "connections/products",
    "connections/from/platform",
    "connections/to/platform",
];

/// Trait for transit API clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Search station candidates by free-text city name
    async fn search_locations(&self, query: &str) -> Result<Vec<Station>, TransitError>;

    /// Fetch upcoming direct connections between two named cities
    async fn fetch_connections(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<Connection>, TransitError>;

    /// Check if the transit service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Client for the transport.opendata.ch API
#[derive(Debug)]
pub struct OpendataTransitClient {
    client: Client,
    config: TransitConfig,
}

impl OpendataTransitClient {
    /// Create a new transit client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("RailScout/0.3")
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn map_send_error(&self, e: &reqwest::Error) -> TransitError {
        if e.is_timeout() {
            TransitError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            TransitError::ConnectionFailed(e.to_string())
        }
    }

    /// Parse the raw locations JSON into station candidates
    fn parse_locations_response(body: &str) -> Result<Vec<Station>, TransitError> {
        let raw: RawLocationsResponse =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;

        Ok(raw.stations.into_iter().map(Station::from).collect())
    }

    /// Parse the raw connections JSON into typed connections
    ///
    /// Entries that are not JSON objects, or objects that do not fit the
    /// expected shape, are skipped rather than failing the whole response.
    fn parse_connections_response(body: &str) -> Result<Vec<Connection>, TransitError> {
        let raw: RawConnectionsResponse =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;

        let connections = raw
            .connections
            .into_iter()
            .filter(serde_json::Value::is_object)
            .filter_map(|value| {
                serde_json::from_value::<RawConnection>(value)
                    .map_err(|e| warn!(error = %e, "Skipping malformed connection entry"))
                    .ok()
            })
            .map(RawConnection::into_connection)
            .collect();

        Ok(connections)
    }
}

#[async_trait]
impl TransitClient for OpendataTransitClient {
    #[instrument(skip(self))]
    async fn search_locations(&self, query: &str) -> Result<Vec<Station>, TransitError> {
        if query.trim().is_empty() {
            return Err(TransitError::InvalidQuery(
                "Search query must not be empty".to_string(),
            ));
        }

        let url = format!("{}/locations", self.config.base_url);
        let params = [("query", query)];

        debug!(?url, ?query, "Searching station candidates");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        let stations = Self::parse_locations_response(&body)?;
        debug!(count = stations.len(), "Station candidates found");
        Ok(stations)
    }

    #[instrument(skip(self))]
    async fn fetch_connections(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<Connection>, TransitError> {
        let url = format!("{}/connections", self.config.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("from", from.to_string()),
            ("to", to.to_string()),
            ("limit", self.config.max_connections.to_string()),
        ];
        for field in CONNECTION_FIELDS {
            params.push(("fields[]", field.to_string()));
        }

        debug!(?url, %from, %to, "Fetching direct connections");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        let connections = Self::parse_connections_response(&body)?;
        if connections.is_empty() {
            debug!(%from, %to, "No direct connections in response");
        } else {
            debug!(count = connections.len(), "Connections found");
        }
        Ok(connections)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/locations?query=Bern", self.config.base_url);
        self.client.get(&url).send().await.is_ok()
    }
}
