//! Geocoding adapter - Implements GeocodingPort using the Nominatim client

use application::error::ApplicationError;
use application::ports::{GeocodedPlace, GeocodingPort};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_transit::{GeocodingClient, GeocodingError, NominatimGeocodingClient, Place};
use tracing::{instrument, warn};

/// Adapter for the Nominatim geocoding client
pub struct GeocodingAdapter {
    client: NominatimGeocodingClient,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"NominatimGeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create a new geocoding adapter
    #[must_use]
    pub const fn new(client: NominatimGeocodingClient) -> Self {
        Self { client }
    }

    /// Validate a raw place into the application-layer type
    ///
    /// A match with out-of-range coordinates counts as a malformed
    /// response, not a miss.
    fn convert_place(place: Place) -> Result<GeocodedPlace, ApplicationError> {
        let location = GeoLocation::new(place.latitude, place.longitude).map_err(|e| {
            ApplicationError::ExternalService(format!("Geocoder returned invalid coordinates: {e}"))
        })?;

        Ok(GeocodedPlace {
            location,
            display_name: place.display_name,
        })
    }

    fn convert_error(error: GeocodingError) -> ApplicationError {
        match error {
            GeocodingError::Timeout | GeocodingError::ConnectionFailed(_) => {
                ApplicationError::TransientNetwork(error.to_string())
            },
            _ => ApplicationError::ExternalService(error.to_string()),
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Option<GeocodedPlace>, ApplicationError> {
        match self.client.search(query).await {
            Ok(place) => Self::convert_place(place).map(Some),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                warn!(error = %e, %query, "Geocoding lookup failed");
                Err(Self::convert_error(e))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_place_converts() {
        let place = Place {
            latitude: 45.7578137,
            longitude: 4.8320114,
            display_name: "Lyon, France".to_string(),
        };
        let converted = GeocodingAdapter::convert_place(place).expect("valid");
        assert_eq!(converted.country().as_deref(), Some("France"));
    }

    #[test]
    fn out_of_range_coordinates_are_a_hard_error() {
        let place = Place {
            latitude: 95.0,
            longitude: 4.83,
            display_name: "Nowhere".to_string(),
        };
        let err = GeocodingAdapter::convert_place(place).unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn timeout_maps_to_transient() {
        let err = GeocodingAdapter::convert_error(GeocodingError::Timeout);
        assert!(err.is_retryable());
    }

    #[test]
    fn protocol_failure_maps_to_external_service() {
        let err =
            GeocodingAdapter::convert_error(GeocodingError::RequestFailed("HTTP 500".to_string()));
        assert!(!err.is_retryable());
    }
}
