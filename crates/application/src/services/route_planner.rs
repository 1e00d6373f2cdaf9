//! Top-level route planning state machine
//!
//! Decides, per query, whether the trip gets a direct-connection lookup or
//! a gateway approximation, and assembles the final plan. The planner keeps
//! no state across queries; everything durable lives in the store.

use std::collections::HashMap;
use std::sync::Arc;

use domain::entities::City;
use domain::value_objects::{CityName, CountrySet, capitalize_country, normalize_country};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{CompanyDirectoryPort, TrainConnection};
use crate::services::{ConnectionService, GeoResolver, RouteApproximator};

/// Terminal failures of a route query
///
/// Every variant maps to a user-facing message; none of them aborts the
/// process.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A city's country could not be determined
    #[error("Could not determine the country for one or both cities")]
    CountryUnresolved,

    /// A city's coordinates could not be resolved by any source
    #[error("Could not fetch coordinates for one or both cities")]
    CoordinatesUnresolved,

    /// No stored city qualified as an intermediate gateway
    #[error("No suitable intermediate city found")]
    NoGatewayFound,

    /// Infrastructure failure outside the fallback discipline
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

/// The planner's terminal success states
#[derive(Debug)]
pub enum RoutePlan {
    /// Both endpoints lie in the direct-coverage region; connections were
    /// queried. An empty list is a valid outcome, not an error.
    Direct {
        from: String,
        to: String,
        connections: Vec<TrainConnection>,
    },
    /// At least one endpoint is outside coverage; the trip is approximated
    /// via a gateway city. The operator URL is reported independently and
    /// may be absent.
    Approximated {
        from: String,
        to: String,
        gateway: City,
        coverage_percent: Option<f64>,
        destination_country: String,
        operator_url: Option<String>,
    },
}

/// Plans a route between two validated city names
pub struct RoutePlanner {
    resolver: GeoResolver,
    connections: ConnectionService,
    approximator: RouteApproximator,
    companies: Arc<dyn CompanyDirectoryPort>,
    coverage: CountrySet,
    destination_hints: HashMap<String, String>,
}

impl std::fmt::Debug for RoutePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlanner")
            .field("coverage", &self.coverage)
            .field("destination_hints", &self.destination_hints)
            .finish_non_exhaustive()
    }
}

impl RoutePlanner {
    /// Create a new planner
    ///
    /// `destination_hints` maps normalized ambiguous city names to the
    /// country passed to the resolver (e.g. "roma" -> "Italy").
    pub fn new(
        resolver: GeoResolver,
        connections: ConnectionService,
        approximator: RouteApproximator,
        companies: Arc<dyn CompanyDirectoryPort>,
        coverage: CountrySet,
        destination_hints: HashMap<String, String>,
    ) -> Self {
        Self {
            resolver,
            connections,
            approximator,
            companies,
            coverage,
            destination_hints,
        }
    }

    /// Plan a route between two cities
    ///
    /// City names are validated by construction ([`CityName`]), so no
    /// network call is ever issued for malformed input.
    #[instrument(skip(self), fields(from = %from, to = %to))]
    pub async fn plan(&self, from: &CityName, to: &CityName) -> Result<RoutePlan, RouteError> {
        info!(%from, %to, "Planning route");

        let start_country = self.resolver.resolve_country(from.as_str()).await;
        let end_country = self.resolver.resolve_country(to.as_str()).await;
        let (Some(start_country), Some(end_country)) = (start_country, end_country) else {
            return Err(RouteError::CountryUnresolved);
        };

        let start_country = normalize_country(&start_country);
        let end_country = normalize_country(&end_country);

        if self.coverage.contains(&start_country) && self.coverage.contains(&end_country) {
            info!(%start_country, %end_country, "Both endpoints in coverage, querying direct connections");
            let connections = self
                .connections
                .fetch_connections(from.as_str(), to.as_str())
                .await;
            return Ok(RoutePlan::Direct {
                from: from.to_string(),
                to: to.to_string(),
                connections,
            });
        }

        info!(%start_country, %end_country, "Endpoint outside coverage, approximating via gateway");
        self.approximate(from, to, &end_country).await
    }

    async fn approximate(
        &self,
        from: &CityName,
        to: &CityName,
        end_country: &str,
    ) -> Result<RoutePlan, RouteError> {
        let start = self.resolver.resolve_coordinates(from.as_str(), None).await;
        let hint = self.destination_hints.get(&to.normalized()).cloned();
        let end = self
            .resolver
            .resolve_coordinates(to.as_str(), hint.as_deref())
            .await;

        let (Some(start), Some(end)) = (start, end) else {
            return Err(RouteError::CoordinatesUnresolved);
        };

        let gateway = self
            .approximator
            .find_gateway(&start.location, &end.location)
            .await?
            .ok_or(RouteError::NoGatewayFound)?;

        let coverage_percent = RouteApproximator::percentage_covered(
            &start.location,
            &gateway.location,
            &end.location,
        );

        let destination_country = capitalize_country(end_country);
        let operator_url = match self.companies.operator_url(&destination_country).await {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, country = %destination_country, "Operator lookup failed");
                None
            },
        };

        Ok(RoutePlan::Approximated {
            from: from.to_string(),
            to: to.to_string(),
            gateway,
            coverage_percent,
            destination_country,
            operator_url,
        })
    }
}
