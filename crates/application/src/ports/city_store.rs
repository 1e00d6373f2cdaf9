//! City store port
//!
//! Defines the interface to the persistent city cache. The infrastructure
//! layer implements this port over SQLite.

use async_trait::async_trait;
use domain::entities::City;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the persistent city store
///
/// Records are created once and never mutated or deleted; at most one
/// record exists per case-normalized name.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CityStorePort: Send + Sync {
    /// Look up a city by name (case-insensitive exact match on the
    /// normalized name)
    async fn get(&self, name: &str) -> Result<Option<City>, ApplicationError>;

    /// Insert a city if no record exists for its normalized name
    ///
    /// A second insert with the same name is a silent no-op, not an
    /// overwrite.
    async fn insert(&self, city: &City) -> Result<(), ApplicationError>;

    /// All stored cities, in insertion order
    ///
    /// The order is fixed so downstream tie-breaking stays deterministic.
    async fn list(&self) -> Result<Vec<City>, ApplicationError>;
}
