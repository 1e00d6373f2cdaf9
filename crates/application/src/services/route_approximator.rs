//! Gateway-city approximation for routes without direct coverage
//!
//! When direct connections are not queried, the trip is approximated by the
//! stored city nearest to the destination, gated by a longitude-band
//! heuristic on the endpoints. The heuristic is a coarse proxy for "roughly
//! along the travel corridor": it can admit implausible intermediates near
//! the poles or across the date line.

use std::sync::Arc;

use domain::entities::City;
use domain::value_objects::GeoLocation;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::CityStorePort;

/// Maximum absolute difference between the start and end longitudes for
/// any stored city to qualify as a gateway, in degrees
const MAX_LONGITUDE_SPREAD_DEG: f64 = 25.0;

/// Finds the best intermediate gateway city for an uncovered route
pub struct RouteApproximator {
    store: Arc<dyn CityStorePort>,
}

impl std::fmt::Debug for RouteApproximator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteApproximator").finish_non_exhaustive()
    }
}

impl RouteApproximator {
    /// Create a new approximator over the city store
    pub fn new(store: Arc<dyn CityStorePort>) -> Self {
        Self { store }
    }

    /// Best gateway between two endpoints, if any stored city qualifies
    ///
    /// Scans every stored city in insertion order. A candidate qualifies
    /// only while the start/end longitude spread is within the band (the
    /// gate tests the endpoint pair, not the candidate). Among qualifying
    /// candidates the one nearest to the end point wins; ties go to the
    /// first encountered.
    #[instrument(skip(self))]
    pub async fn find_gateway(
        &self,
        start: &GeoLocation,
        end: &GeoLocation,
    ) -> Result<Option<City>, ApplicationError> {
        let cities = self.store.list().await?;
        debug!(candidates = cities.len(), "Scanning for gateway");

        let mut nearest: Option<(City, f64)> = None;
        for city in cities {
            if start.longitude_spread(end) > MAX_LONGITUDE_SPREAD_DEG {
                continue;
            }

            let distance = end.distance_km(&city.location);
            let better = nearest
                .as_ref()
                .is_none_or(|(_, best)| distance < *best);
            if better {
                nearest = Some((city, distance));
            }
        }

        if let Some((ref city, distance)) = nearest {
            debug!(gateway = %city.name, distance_km = distance, "Gateway selected");
        }
        Ok(nearest.map(|(city, _)| city))
    }

    /// Fraction of the start-to-end great-circle trip covered by reaching
    /// the gateway, as a percentage
    ///
    /// `None` when start and end coincide (zero total distance).
    #[must_use]
    pub fn percentage_covered(
        start: &GeoLocation,
        gateway: &GeoLocation,
        end: &GeoLocation,
    ) -> Option<f64> {
        let total = start.distance_km(end);
        if total == 0.0 {
            return None;
        }
        Some(start.distance_km(gateway) / total * 100.0)
    }
}
