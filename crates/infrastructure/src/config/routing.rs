//! Route-planning configuration

use std::collections::HashMap;

use domain::value_objects::CountrySet;
use serde::{Deserialize, Serialize};

/// Route-planning configuration
///
/// The coverage list carries every accepted spelling of the directly
/// covered countries, localized variants included, since the geocoder
/// reports country names in the local language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Accepted spellings of the direct-coverage countries
    #[serde(default = "default_coverage_countries")]
    pub coverage_countries: Vec<String>,

    /// Country hints for ambiguous destination names, keyed by the
    /// normalized city name (e.g. "roma" -> "Italy")
    #[serde(default = "default_destination_hints")]
    pub destination_hints: HashMap<String, String>,
}

fn default_coverage_countries() -> Vec<String> {
    vec![
        "Switzerland".to_string(),
        "Schweiz/Suisse/Svizzera/Svizra".to_string(),
        "France".to_string(),
    ]
}

fn default_destination_hints() -> HashMap<String, String> {
    HashMap::from([("roma".to_string(), "Italy".to_string())])
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            coverage_countries: default_coverage_countries(),
            destination_hints: default_destination_hints(),
        }
    }
}

impl RoutingConfig {
    /// Build the coverage set used for classification
    #[must_use]
    pub fn coverage_set(&self) -> CountrySet {
        CountrySet::new(&self.coverage_countries)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.coverage_countries.is_empty() {
            return Err("routing.coverage_countries must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_coverage_matches_deployment() {
        let config = RoutingConfig::default();
        let set = config.coverage_set();
        assert!(set.contains("switzerland"));
        assert!(set.contains("SCHWEIZ/SUISSE/SVIZZERA/SVIZRA"));
        assert!(set.contains("France"));
        assert!(!set.contains("Italia"));
    }

    #[test]
    fn default_hints_cover_roma() {
        let config = RoutingConfig::default();
        assert_eq!(
            config.destination_hints.get("roma").map(String::as_str),
            Some("Italy")
        );
    }

    #[test]
    fn empty_coverage_rejected() {
        let config = RoutingConfig {
            coverage_countries: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
