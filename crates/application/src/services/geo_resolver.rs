//! City-to-coordinates resolution across layered sources
//!
//! Resolves a city name to coordinates through an ordered chain of sources:
//! the local store, the transit network's location search, and the generic
//! geocoder. The transit network is authoritative and richer inside its
//! coverage region (it also yields the station id used for scheduling), but
//! the geocoder works anywhere - so for a city known to lie outside
//! coverage the geocoder is consulted first and a transit query is only a
//! later resort.
//!
//! The chain is data, not control flow: [`GeoResolver::resolution_plan`]
//! returns the ordered sources for a query, and adding or reordering a
//! source is a change to that list.

use std::sync::Arc;

use domain::entities::City;
use domain::value_objects::CountrySet;
use tracing::{debug, instrument, warn};

use crate::ports::{CityStorePort, GeocodingPort, TransitPort};

/// Attempts for the transit-network location lookup; the second attempt
/// fires only on a transient error, with no inter-attempt delay
const LOCATION_LOOKUP_ATTEMPTS: u32 = 2;

/// One source in the resolution chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverSource {
    /// Previously resolved cities in the local store
    LocalStore,
    /// Geocoder queried with the explicit country, tried early when the
    /// country lies outside transit coverage
    GeocoderPreferred,
    /// Transit-network location search
    TransitNetwork,
    /// Geocoder as the universal fallback
    GeocoderFallback,
}

/// Resolves city names to coordinates and countries
#[derive(Clone)]
pub struct GeoResolver {
    store: Arc<dyn CityStorePort>,
    transit: Arc<dyn TransitPort>,
    geocoder: Arc<dyn GeocodingPort>,
    coverage: CountrySet,
}

impl std::fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoResolver")
            .field("coverage", &self.coverage)
            .finish_non_exhaustive()
    }
}

impl GeoResolver {
    /// Create a new resolver over the given ports
    pub fn new(
        store: Arc<dyn CityStorePort>,
        transit: Arc<dyn TransitPort>,
        geocoder: Arc<dyn GeocodingPort>,
        coverage: CountrySet,
    ) -> Self {
        Self {
            store,
            transit,
            geocoder,
            coverage,
        }
    }

    /// Ordered sources to try for a query with the given optional country
    #[must_use]
    pub fn resolution_plan(&self, country: Option<&str>) -> Vec<ResolverSource> {
        let mut plan = vec![ResolverSource::LocalStore];
        if country.is_some_and(|c| !self.coverage.contains(c)) {
            plan.push(ResolverSource::GeocoderPreferred);
        }
        plan.push(ResolverSource::TransitNetwork);
        plan.push(ResolverSource::GeocoderFallback);
        plan
    }

    /// Resolve a city to coordinates, walking the source chain
    ///
    /// Every failure mode inside a source degrades to trying the next one;
    /// `None` means the whole chain came up empty. The first successful
    /// network resolution is written back to the store.
    #[instrument(skip(self))]
    pub async fn resolve_coordinates(&self, city: &str, country: Option<&str>) -> Option<City> {
        for source in self.resolution_plan(country) {
            let resolved = match source {
                ResolverSource::LocalStore => self.from_store(city).await,
                ResolverSource::GeocoderPreferred | ResolverSource::GeocoderFallback => {
                    self.from_geocoder(city, country).await
                },
                ResolverSource::TransitNetwork => self.from_transit(city).await,
            };

            if let Some(resolved) = resolved {
                if source != ResolverSource::LocalStore {
                    self.remember(&resolved).await;
                }
                debug!(?source, %city, "Resolved coordinates");
                return Some(resolved);
            }
        }

        debug!(%city, "All resolver sources exhausted");
        None
    }

    /// Resolve the country a city lies in
    ///
    /// One geocoder query, no retry; the country is the last
    /// comma-separated component of the formatted address.
    #[instrument(skip(self))]
    pub async fn resolve_country(&self, city: &str) -> Option<String> {
        match self.geocoder.search(city).await {
            Ok(Some(place)) => place.country(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, %city, "Country lookup failed");
                None
            },
        }
    }

    async fn from_store(&self, city: &str) -> Option<City> {
        match self.store.get(city).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, %city, "City store lookup failed");
                None
            },
        }
    }

    async fn from_geocoder(&self, city: &str, country: Option<&str>) -> Option<City> {
        let query = country.map_or_else(|| city.to_string(), |c| format!("{city}, {c}"));
        match self.geocoder.search(&query).await {
            Ok(Some(place)) => Some(City::new(city, place.location)),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, %query, "Geocoder lookup failed");
                None
            },
        }
    }

    async fn from_transit(&self, city: &str) -> Option<City> {
        for attempt in 1..=LOCATION_LOOKUP_ATTEMPTS {
            match self.transit.search_stations(city).await {
                Ok(stations) => return Self::first_usable_station(city, stations),
                Err(e) if e.is_retryable() && attempt < LOCATION_LOOKUP_ATTEMPTS => {
                    warn!(attempt, error = %e, %city, "Transient error during station search");
                },
                Err(e) => {
                    warn!(error = %e, %city, "Station search failed");
                    return None;
                },
            }
        }
        None
    }

    /// First candidate with coordinates that are present and in bounds
    fn first_usable_station(
        city: &str,
        stations: Vec<crate::ports::Station>,
    ) -> Option<City> {
        stations.into_iter().find_map(|station| {
            let location = station.coordinates()?;
            let mut resolved = City::new(city, location);
            resolved.station_id = station.id;
            resolved.station_name = station.name;
            Some(resolved)
        })
    }

    async fn remember(&self, city: &City) {
        if let Err(e) = self.store.insert(city).await {
            warn!(error = %e, city = %city.name, "Failed to cache resolved city");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::ports::{
        GeocodedPlace, MockCityStorePort, MockGeocodingPort, MockTransitPort, Station,
    };
    use domain::value_objects::GeoLocation;

    fn coverage() -> CountrySet {
        CountrySet::new(["Switzerland", "Schweiz/Suisse/Svizzera/Svizra", "France"])
    }

    fn zurich_station() -> Station {
        Station {
            id: Some("8503000".to_string()),
            name: Some("Zürich HB".to_string()),
            latitude: Some(47.377847),
            longitude: Some(8.540502),
        }
    }

    fn resolver(
        store: MockCityStorePort,
        transit: MockTransitPort,
        geocoder: MockGeocodingPort,
    ) -> GeoResolver {
        GeoResolver::new(
            Arc::new(store),
            Arc::new(transit),
            Arc::new(geocoder),
            coverage(),
        )
    }

    fn empty_store() -> MockCityStorePort {
        let mut store = MockCityStorePort::new();
        store.expect_get().returning(|_| Ok(None));
        store.expect_insert().returning(|_| Ok(()));
        store
    }

    #[test]
    fn plan_puts_geocoder_first_outside_coverage() {
        let r = resolver(
            MockCityStorePort::new(),
            MockTransitPort::new(),
            MockGeocodingPort::new(),
        );
        let plan = r.resolution_plan(Some("Italia"));
        assert_eq!(
            plan,
            vec![
                ResolverSource::LocalStore,
                ResolverSource::GeocoderPreferred,
                ResolverSource::TransitNetwork,
                ResolverSource::GeocoderFallback,
            ]
        );
    }

    #[test]
    fn plan_skips_preferred_geocoder_inside_coverage() {
        let r = resolver(
            MockCityStorePort::new(),
            MockTransitPort::new(),
            MockGeocodingPort::new(),
        );
        for country in [None, Some("Switzerland"), Some("france")] {
            let plan = r.resolution_plan(country);
            assert_eq!(
                plan,
                vec![
                    ResolverSource::LocalStore,
                    ResolverSource::TransitNetwork,
                    ResolverSource::GeocoderFallback,
                ]
            );
        }
    }

    #[tokio::test]
    async fn store_hit_short_circuits_network_sources() {
        let mut store = MockCityStorePort::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(City::new("Zurich", GeoLocation::zurich()))));
        let mut transit = MockTransitPort::new();
        transit.expect_search_stations().times(0);
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_search().times(0);

        let r = resolver(store, transit, geocoder);
        let resolved = r.resolve_coordinates("Zurich", None).await.unwrap();
        assert_eq!(resolved.name, "Zurich");
    }

    #[tokio::test]
    async fn transit_station_resolution_is_cached() {
        let mut store = MockCityStorePort::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_insert()
            .times(1)
            .withf(|city| city.station_id.as_deref() == Some("8503000"))
            .returning(|_| Ok(()));

        let mut transit = MockTransitPort::new();
        transit
            .expect_search_stations()
            .times(1)
            .returning(|_| Ok(vec![zurich_station()]));
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_search().times(0);

        let r = resolver(store, transit, geocoder);
        let resolved = r.resolve_coordinates("Zurich", None).await.unwrap();
        assert_eq!(resolved.station_name.as_deref(), Some("Zürich HB"));
    }

    #[tokio::test]
    async fn skips_candidates_without_usable_coordinates() {
        let mut transit = MockTransitPort::new();
        transit.expect_search_stations().returning(|_| {
            Ok(vec![
                Station {
                    id: Some("1".to_string()),
                    name: Some("No coords".to_string()),
                    latitude: None,
                    longitude: None,
                },
                zurich_station(),
            ])
        });
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_search().times(0);

        let r = resolver(empty_store(), transit, geocoder);
        let resolved = r.resolve_coordinates("Zurich", None).await.unwrap();
        assert_eq!(resolved.station_id.as_deref(), Some("8503000"));
    }

    #[tokio::test]
    async fn outside_coverage_prefers_geocoder_over_transit() {
        let mut transit = MockTransitPort::new();
        transit.expect_search_stations().times(0);

        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .times(1)
            .withf(|query| query == "Roma, Italy")
            .returning(|_| {
                Ok(Some(GeocodedPlace {
                    location: GeoLocation::new_unchecked(41.8933, 12.4829),
                    display_name: "Roma, Lazio, Italia".to_string(),
                }))
            });

        let r = resolver(empty_store(), transit, geocoder);
        let resolved = r.resolve_coordinates("Roma", Some("Italy")).await.unwrap();
        assert!((resolved.location.latitude() - 41.8933).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn transient_transit_error_is_retried_once() {
        let mut transit = MockTransitPort::new();
        let mut attempts = 0;
        transit.expect_search_stations().times(2).returning(move |_| {
            attempts += 1;
            if attempts == 1 {
                Err(ApplicationError::TransientNetwork("timeout".to_string()))
            } else {
                Ok(vec![zurich_station()])
            }
        });
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_search().times(0);

        let r = resolver(empty_store(), transit, geocoder);
        assert!(r.resolve_coordinates("Zurich", None).await.is_some());
    }

    #[tokio::test]
    async fn hard_transit_error_is_not_retried() {
        let mut transit = MockTransitPort::new();
        transit
            .expect_search_stations()
            .times(1)
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 500".to_string())));

        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_| Ok(None));

        let r = resolver(empty_store(), transit, geocoder);
        assert!(r.resolve_coordinates("Zurich", None).await.is_none());
    }

    #[tokio::test]
    async fn falls_back_to_geocoder_with_country_suffix() {
        let mut transit = MockTransitPort::new();
        transit.expect_search_stations().returning(|_| Ok(vec![]));

        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .withf(|query| query == "Lyon, France")
            .returning(|_| {
                Ok(Some(GeocodedPlace {
                    location: GeoLocation::lyon(),
                    display_name: "Lyon, France".to_string(),
                }))
            });

        let r = resolver(empty_store(), transit, geocoder);
        let resolved = r.resolve_coordinates("Lyon", Some("France")).await.unwrap();
        assert!(resolved.station_id.is_none());
    }

    #[tokio::test]
    async fn resolve_country_extracts_last_segment() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_search().times(1).returning(|_| {
            Ok(Some(GeocodedPlace {
                location: GeoLocation::zurich(),
                display_name: "Zürich, Schweiz/Suisse/Svizzera/Svizra".to_string(),
            }))
        });

        let r = resolver(MockCityStorePort::new(), MockTransitPort::new(), geocoder);
        assert_eq!(
            r.resolve_country("Zurich").await.as_deref(),
            Some("Schweiz/Suisse/Svizzera/Svizra")
        );
    }

    #[tokio::test]
    async fn resolve_country_absorbs_lookup_failure() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_| Err(ApplicationError::TransientNetwork("timeout".to_string())));

        let r = resolver(MockCityStorePort::new(), MockTransitPort::new(), geocoder);
        assert!(r.resolve_country("Zurich").await.is_none());
    }
}
