//! Country-name normalization and coverage classification
//!
//! Geocoders return country names in the local language ("Schweiz/Suisse/
//! Svizzera/Svizra", "Österreich", "Česko"). All matching against such
//! names goes through one normalization function and the `CountrySet`
//! lookup so spelling variants live in configuration, not call sites.

use std::collections::HashSet;

/// Normalize a country name for matching: trimmed and lowercased
#[must_use]
pub fn normalize_country(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Capitalize a country name the way the operator directory keys it:
/// first letter uppercased, the rest lowercased ("france" -> "France")
#[must_use]
pub fn capitalize_country(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// A set of accepted country-name spellings, matched case-insensitively
///
/// Used to classify whether a country belongs to the direct-coverage
/// region of the transit network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySet {
    names: HashSet<String>,
}

impl CountrySet {
    /// Build a set from accepted spellings (normalized on insert)
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| normalize_country(n.as_ref()))
                .collect(),
        }
    }

    /// Check whether a raw country name matches any accepted spelling
    #[must_use]
    pub fn contains(&self, raw: &str) -> bool {
        self.names.contains(&normalize_country(raw))
    }

    /// Number of accepted spellings
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no spellings are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
