//! Transit service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the transport.opendata.ch API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL for the transport.opendata.ch API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection-query timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of upcoming connections to request
    #[serde(default = "default_max_connections")]
    pub max_connections: u8,
}

fn default_base_url() -> String {
    "http://transport.opendata.ch/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    20
}

const fn default_max_connections() -> u8 {
    6
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_connections: default_max_connections(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            max_connections: 2,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_connections == 0 {
            return Err("max_connections must be greater than 0".to_string());
        }

        if self.max_connections > 16 {
            return Err("max_connections must be 16 or less".to_string());
        }

        Ok(())
    }
}
