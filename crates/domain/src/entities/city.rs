//! City entity - a city with resolved geographic coordinates

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A city with resolved coordinates
///
/// Created by the resolver on first successful lookup and persisted;
/// never mutated or deleted afterwards. Identity is the case-normalized
/// name - the store holds at most one record per normalized name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// City name as first resolved
    pub name: String,
    /// Geographic coordinates
    pub location: GeoLocation,
    /// Station identifier, present when the transit network resolved this city
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    /// Station display name from the transit network (e.g. "Zürich HB")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_name: Option<String>,
}

impl City {
    /// Create a city record without station details
    #[must_use]
    pub fn new(name: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            name: name.into(),
            location,
            station_id: None,
            station_name: None,
        }
    }

    /// Attach the station details the transit network reported
    #[must_use]
    pub fn with_station(
        mut self,
        station_id: impl Into<String>,
        station_name: impl Into<String>,
    ) -> Self {
        self.station_id = Some(station_id.into());
        self.station_name = Some(station_name.into());
        self
    }

    /// Case-normalized identity key
    #[must_use]
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Display label: the station name when known, the city name otherwise
    #[must_use]
    pub fn label(&self) -> &str {
        self.station_name.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_city_has_no_station() {
        let city = City::new("Lyon", GeoLocation::lyon());
        assert_eq!(city.name, "Lyon");
        assert!(city.station_id.is_none());
        assert!(city.station_name.is_none());
    }

    #[test]
    fn with_station_sets_both_fields() {
        let city = City::new("Zurich", GeoLocation::zurich()).with_station("8503000", "Zürich HB");
        assert_eq!(city.station_id.as_deref(), Some("8503000"));
        assert_eq!(city.station_name.as_deref(), Some("Zürich HB"));
    }

    #[test]
    fn normalized_name_lowercases_and_trims() {
        let city = City::new(" Zürich ", GeoLocation::zurich());
        assert_eq!(city.normalized_name(), "zürich");
    }

    #[test]
    fn label_prefers_station_name() {
        let plain = City::new("Lyon", GeoLocation::lyon());
        assert_eq!(plain.label(), "Lyon");

        let with_station =
            City::new("Zurich", GeoLocation::zurich()).with_station("8503000", "Zürich HB");
        assert_eq!(with_station.label(), "Zürich HB");
    }

    #[test]
    fn serialization_skips_absent_station() {
        let city = City::new("Lyon", GeoLocation::lyon());
        let json = serde_json::to_string(&city).expect("serialize");
        assert!(!json.contains("station_id"));

        let round: City = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(round, city);
    }
}
