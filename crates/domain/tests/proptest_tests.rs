//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{CityName, GeoLocation, normalize_country};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_err());
        }

        #[test]
        fn distance_to_self_is_zero(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            if let Ok(loc) = GeoLocation::new(lat, lon) {
                let distance = loc.distance_km(&loc);
                prop_assert!(distance.abs() < 0.001);
            }
        }

        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let a = GeoLocation::new(lat1, lon1).unwrap();
            let b = GeoLocation::new(lat2, lon2).unwrap();
            prop_assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-6);
        }

        #[test]
        fn distance_is_non_negative_and_bounded(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let a = GeoLocation::new(lat1, lon1).unwrap();
            let b = GeoLocation::new(lat2, lon2).unwrap();
            let d = a.distance_km(&b);
            prop_assert!(d >= 0.0);
            // Half the circumference of a 6371 km sphere, with slack
            prop_assert!(d <= 20_016.0);
        }

        #[test]
        fn longitude_spread_is_symmetric(
            lat1 in -90.0f64..=90.0f64,
            lon1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lon2 in -180.0f64..=180.0f64
        ) {
            let a = GeoLocation::new(lat1, lon1).unwrap();
            let b = GeoLocation::new(lat2, lon2).unwrap();
            prop_assert!((a.longitude_spread(&b) - b.longitude_spread(&a)).abs() < f64::EPSILON);
        }
    }
}

// ============================================================================
// CityName Property Tests
// ============================================================================

mod city_name_tests {
    use super::*;

    proptest! {
        #[test]
        fn alphabetic_names_accepted(name in "[a-zA-Z]{1,30}( [a-zA-Z]{1,30}){0,2}") {
            prop_assert!(CityName::parse(&name).is_ok());
        }

        #[test]
        fn names_with_digits_rejected(
            prefix in "[a-zA-Z]{1,10}",
            digit in 0u8..=9u8
        ) {
            let name = format!("{prefix}{digit}");
            prop_assert!(CityName::parse(&name).is_err());
        }

        #[test]
        fn whitespace_only_rejected(spaces in " {1,10}") {
            prop_assert!(CityName::parse(&spaces).is_err());
        }

        #[test]
        fn parsed_value_is_trimmed(core in "[a-zA-Z]{1,20}") {
            let padded = format!("  {core}  ");
            let name = CityName::parse(&padded).unwrap();
            prop_assert_eq!(name.as_str(), core.as_str());
        }
    }
}

// ============================================================================
// Country Normalization Property Tests
// ============================================================================

mod country_tests {
    use super::*;

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "\\PC{0,40}") {
            let once = normalize_country(&raw);
            let twice = normalize_country(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalization_ignores_surrounding_whitespace(core in "[a-zA-Z]{1,20}") {
            let padded = format!("  {core} ");
            prop_assert_eq!(normalize_country(&padded), normalize_country(&core));
        }
    }
}
