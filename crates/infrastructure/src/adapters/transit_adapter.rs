//! Transit adapter - Implements TransitPort using integration_transit

use application::error::ApplicationError;
use application::ports::{Station, TrainConnection, TransitPort};
use application::services::schedule::parse_duration_minutes;
use async_trait::async_trait;
use integration_transit::{
    Connection as ApiConnection, OpendataTransitClient, Station as ApiStation, TransitClient,
    TransitError,
};
use tracing::instrument;

/// Adapter for the transport.opendata.ch client
pub struct TransitAdapter {
    client: OpendataTransitClient,
}

impl std::fmt::Debug for TransitAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAdapter")
            .field("client", &"OpendataTransitClient")
            .finish()
    }
}

impl TransitAdapter {
    /// Create a new transit adapter
    #[must_use]
    pub const fn new(client: OpendataTransitClient) -> Self {
        Self { client }
    }

    /// Map a client error into the application taxonomy, preserving
    /// whether it is worth a retry
    fn convert_error(error: TransitError) -> ApplicationError {
        if error.is_retryable() {
            ApplicationError::TransientNetwork(error.to_string())
        } else {
            ApplicationError::ExternalService(error.to_string())
        }
    }

    fn convert_station(station: ApiStation) -> Station {
        Station {
            id: station.id,
            name: station.name,
            latitude: station.latitude,
            longitude: station.longitude,
        }
    }

    fn convert_connection(connection: ApiConnection) -> TrainConnection {
        TrainConnection {
            departure: connection.departure,
            arrival: connection.arrival,
            duration_minutes: connection
                .duration
                .as_deref()
                .and_then(parse_duration_minutes),
            products: connection.products,
            from_platform: connection.from_platform,
            to_platform: connection.to_platform,
        }
    }
}

#[async_trait]
impl TransitPort for TransitAdapter {
    #[instrument(skip(self))]
    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, ApplicationError> {
        let stations = self
            .client
            .search_locations(query)
            .await
            .map_err(Self::convert_error)?;

        Ok(stations.into_iter().map(Self::convert_station).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_connections(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<TrainConnection>, ApplicationError> {
        let connections = self
            .client
            .fetch_connections(from, to)
            .await
            .map_err(Self::convert_error)?;

        Ok(connections
            .into_iter()
            .map(Self::convert_connection)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors_stay_transient() {
        let err = TransitAdapter::convert_error(TransitError::Timeout { timeout_secs: 20 });
        assert!(err.is_retryable());

        let err =
            TransitAdapter::convert_error(TransitError::ConnectionFailed("refused".to_string()));
        assert!(err.is_retryable());
    }

    #[test]
    fn hard_errors_become_external_service() {
        let err =
            TransitAdapter::convert_error(TransitError::RequestFailed("HTTP 500".to_string()));
        assert!(!err.is_retryable());
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn station_conversion_keeps_fields() {
        let api = ApiStation {
            id: Some("8503000".to_string()),
            name: Some("Zürich HB".to_string()),
            latitude: Some(47.377847),
            longitude: Some(8.540502),
        };
        let station = TransitAdapter::convert_station(api);
        assert_eq!(station.id.as_deref(), Some("8503000"));
        assert!(station.coordinates().is_some());
    }

    #[test]
    fn connection_conversion_parses_duration() {
        let api = ApiConnection {
            departure: None,
            arrival: None,
            duration: Some("01d03:00:00".to_string()),
            products: vec!["NJ".to_string()],
            from_platform: Some("12".to_string()),
            to_platform: None,
        };
        let connection = TransitAdapter::convert_connection(api);
        assert_eq!(connection.duration_minutes, Some(1620));
        assert_eq!(connection.products, vec!["NJ".to_string()]);
    }

    #[test]
    fn unparseable_duration_becomes_none() {
        let api = ApiConnection {
            departure: None,
            arrival: None,
            duration: Some("garbled".to_string()),
            products: vec![],
            from_platform: None,
            to_platform: None,
        };
        let connection = TransitAdapter::convert_connection(api);
        assert!(connection.duration_minutes.is_none());
    }
}
