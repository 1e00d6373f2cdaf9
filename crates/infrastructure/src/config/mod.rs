//! Application configuration
//!
//! Split into focused sub-modules:
//! - `database`: SQLite database settings
//! - `routing`: direct-coverage countries and destination hints
//!
//! The transit and geocoding client configurations come from the
//! integration crate and nest here unchanged.

mod database;
mod routing;

use integration_transit::{NominatimConfig, TransitConfig};
use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use routing::RoutingConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Transit API configuration
    #[serde(default)]
    pub transit: TransitConfig,

    /// Geocoding (Nominatim) configuration
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// Route-planning configuration
    #[serde(default)]
    pub routing: RoutingConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Reads `config.toml` from the working directory when present, then
    /// applies `RAILSCOUT_*` environment overrides
    /// (e.g. `RAILSCOUT_DATABASE_PATH`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("RAILSCOUT")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid section.
    pub fn validate(&self) -> Result<(), String> {
        self.transit.validate()?;
        self.routing.validate()?;

        if self.database.path.is_empty() {
            return Err("database.path must not be empty".to_string());
        }

        Ok(())
    }
}
