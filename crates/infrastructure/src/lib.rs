//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: SQLite-backed
//! stores, adapters over the transit and geocoding clients, configuration
//! loading, and the one-time database seeding routine.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod seed;

pub use adapters::{GeocodingAdapter, TransitAdapter};
pub use config::{AppConfig, DatabaseConfig, RoutingConfig};
pub use persistence::{
    ConnectionPool, SqliteBlacklistStore, SqliteCityStore, SqliteCompanyStore, create_pool,
};
pub use seed::{SeedSummary, seed_database};
