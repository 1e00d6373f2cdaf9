//! Swiss public transit integration for RailScout
//!
//! Provides station search and direct-connection queries via the
//! [transport.opendata.ch](https://transport.opendata.ch) API (covering the
//! Swiss rail network and its cross-border services) and free-text geocoding
//! via [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern: [`TransitClient`] defines the
//! interface for station and connection lookups, implemented by
//! [`OpendataTransitClient`]. [`GeocodingClient`] handles place search via
//! [`NominatimGeocodingClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{OpendataTransitClient, TransitConfig, TransitClient};
//!
//! let config = TransitConfig::default();
//! let client = OpendataTransitClient::new(&config)?;
//!
//! let stations = client.search_locations("Zurich").await?;
//! let connections = client.fetch_connections("Zurich", "Geneva").await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{OpendataTransitClient, TransitClient};
pub use config::TransitConfig;
pub use error::TransitError;
pub use geocoding::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient, Place};
pub use models::{Connection, Station};
