//! Geocoding port
//!
//! Defines the interface for free-text place resolution. The infrastructure
//! layer implements this port over the Nominatim client.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A geocoded place: validated coordinates plus the formatted address
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    /// Resolved coordinates
    pub location: GeoLocation,
    /// Formatted address, most-specific component first, country last
    pub display_name: String,
}

impl GeocodedPlace {
    /// Country of the place: the last comma-separated component of the
    /// formatted address, trimmed
    #[must_use]
    pub fn country(&self) -> Option<String> {
        self.display_name
            .rsplit(',')
            .next()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
    }
}

/// Port for geocoding operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a free-text query to the best-matching place
    ///
    /// `Ok(None)` means nothing matched; `Err` means the lookup failed.
    async fn search(&self, query: &str) -> Result<Option<GeocodedPlace>, ApplicationError>;
}
