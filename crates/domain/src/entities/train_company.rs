//! Train company reference record

use serde::{Deserialize, Serialize};

/// Maps one country-name spelling to a rail operator's public site
///
/// Seed-time reference data; one record exists per accepted spelling
/// (localized variants included), all pointing at the same URL.
/// Read-only after seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainCompany {
    /// Country-name spelling this record is keyed by (e.g. "Italia")
    pub country: String,
    /// Operator website (e.g. "https://www.trenitalia.com")
    pub url: String,
}

impl TrainCompany {
    /// Create a new train company record
    #[must_use]
    pub fn new(country: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            url: url.into(),
        }
    }
}
