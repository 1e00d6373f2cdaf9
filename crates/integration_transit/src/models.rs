//! Typed models for transport.opendata.ch responses

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// A station candidate from the `/locations` endpoint
///
/// The API frequently returns candidates with partial data (POIs without an
/// id, entries without coordinates), so every field is optional and callers
/// filter via [`Station::valid_coordinates`].
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Station identifier (e.g. "8503000")
    pub id: Option<String>,
    /// Station display name (e.g. "Zürich HB")
    pub name: Option<String>,
    /// Latitude, when the candidate carries a coordinate
    pub latitude: Option<f64>,
    /// Longitude, when the candidate carries a coordinate
    pub longitude: Option<f64>,
}

impl Station {
    /// Coordinates of this candidate, if present and within valid bounds
    #[must_use]
    pub fn valid_coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = (self.latitude?, self.longitude?);
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Some((lat, lon))
        } else {
            None
        }
    }
}

/// A direct connection from the `/connections` endpoint
///
/// Fields mirror what the query requests; any of them may be absent in the
/// wire data and render as "Unknown" downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Departure time at the origin
    pub departure: Option<DateTime<FixedOffset>>,
    /// Arrival time at the destination
    pub arrival: Option<DateTime<FixedOffset>>,
    /// Raw journey duration in the API's `DDdHH:MM:SS` shape
    pub duration: Option<String>,
    /// Transport products in travel order (e.g. "IC 8", "S3")
    pub products: Vec<String>,
    /// Departure platform at the origin
    pub from_platform: Option<String>,
    /// Arrival platform at the destination
    pub to_platform: Option<String>,
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
pub(crate) struct RawLocationsResponse {
    #[serde(default)]
    pub(crate) stations: Vec<RawStation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStation {
    pub(crate) id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) coordinate: Option<RawCoordinate>,
}

/// The API encodes latitude as `x` and longitude as `y`
#[derive(Debug, Deserialize)]
pub(crate) struct RawCoordinate {
    pub(crate) x: Option<f64>,
    pub(crate) y: Option<f64>,
}

impl From<RawStation> for Station {
    fn from(raw: RawStation) -> Self {
        let (latitude, longitude) = raw
            .coordinate
            .map_or((None, None), |coord| (coord.x, coord.y));
        Self {
            id: raw.id,
            name: raw.name,
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawConnectionsResponse {
    #[serde(default)]
    pub(crate) connections: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawConnection {
    pub(crate) from: Option<RawCheckpoint>,
    pub(crate) to: Option<RawCheckpoint>,
    pub(crate) duration: Option<String>,
    #[serde(default)]
    pub(crate) products: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCheckpoint {
    pub(crate) departure: Option<String>,
    pub(crate) arrival: Option<String>,
    pub(crate) platform: Option<String>,
}

impl RawConnection {
    pub(crate) fn into_connection(self) -> Connection {
        let (departure, from_platform) = self.from.map_or((None, None), |checkpoint| {
            (
                checkpoint.departure.as_deref().and_then(parse_timestamp),
                checkpoint.platform,
            )
        });
        let (arrival, to_platform) = self.to.map_or((None, None), |checkpoint| {
            (
                checkpoint.arrival.as_deref().and_then(parse_timestamp),
                checkpoint.platform,
            )
        });

        Connection {
            departure,
            arrival,
            duration: self.duration,
            products: self.products,
            from_platform,
            to_platform,
        }
    }
}

/// Parse the API's ISO-8601 timestamps
///
/// The connections endpoint emits offsets without a colon ("+0200"), which
/// RFC 3339 parsing rejects, so both shapes are accepted.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}
