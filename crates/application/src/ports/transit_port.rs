//! Transit API port
//!
//! Defines the interface for station search and direct-connection queries.
//! The infrastructure layer implements this port over the transit API
//! client.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A station candidate returned by the transit network's location search
///
/// Candidates frequently carry partial data; [`Station::coordinates`]
/// yields a validated location only when one is present and in bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station identifier, usable for later scheduling queries
    pub id: Option<String>,
    /// Station display name
    pub name: Option<String>,
    /// Latitude, when reported
    pub latitude: Option<f64>,
    /// Longitude, when reported
    pub longitude: Option<f64>,
}

impl Station {
    /// Validated coordinates of this candidate, when present and in bounds
    #[must_use]
    pub fn coordinates(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.latitude?, self.longitude?).ok()
    }
}

/// A direct transit connection between two cities
///
/// Transient query output; formatted for display and then discarded.
/// Absent fields render as "Unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConnection {
    /// Departure time at the origin
    pub departure: Option<DateTime<FixedOffset>>,
    /// Arrival time at the destination
    pub arrival: Option<DateTime<FixedOffset>>,
    /// Total travel time in minutes, days already folded in
    pub duration_minutes: Option<u32>,
    /// Transport products in travel order (e.g. "IC 1", "S3")
    pub products: Vec<String>,
    /// Departure platform at the origin
    pub from_platform: Option<String>,
    /// Arrival platform at the destination
    pub to_platform: Option<String>,
}

/// Port for transit API operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitPort: Send + Sync {
    /// Search station candidates by free-text city name
    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, ApplicationError>;

    /// Fetch upcoming direct connections between two named cities
    ///
    /// An empty `Ok` means the service confirmed there is no connection;
    /// an `Err` means the query itself failed - callers must treat the
    /// two differently.
    async fn fetch_connections(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<TrainConnection>, ApplicationError>;
}
