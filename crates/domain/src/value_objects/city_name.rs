//! City name value object with input validation

use std::fmt;

use crate::errors::DomainError;

/// A validated city name
///
/// Accepted names are non-empty, not whitespace-only, and contain only
/// alphabetic characters and spaces. Unicode letters are allowed, so
/// "Zürich" and "Genève" pass while "Zürich2" and "St. Gallen" do not.
/// The stored value is trimmed; validation runs against the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityName {
    value: String,
}

impl CityName {
    /// Parse and validate a city name from user input
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCityName` when the input is empty,
    /// whitespace-only, or contains anything besides letters and spaces.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if input.trim().is_empty() {
            return Err(DomainError::InvalidCityName(
                "must not be empty or only spaces".to_string(),
            ));
        }

        if !input
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace())
        {
            return Err(DomainError::InvalidCityName(
                "only letters and spaces are allowed".to_string(),
            ));
        }

        Ok(Self {
            value: input.trim().to_string(),
        })
    }

    /// Get the city name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Case-normalized identity key for store lookups
    #[must_use]
    pub fn normalized(&self) -> String {
        self.value.to_lowercase()
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for CityName {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<&str> for CityName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_name() {
        let name = CityName::parse("Lausanne").expect("valid");
        assert_eq!(name.as_str(), "Lausanne");
    }

    #[test]
    fn accepts_name_with_space() {
        assert!(CityName::parse("St Gallen").is_ok());
    }

    #[test]
    fn accepts_unicode_letters() {
        assert!(CityName::parse("Zürich").is_ok());
        assert!(CityName::parse("Genève").is_ok());
    }

    #[test]
    fn rejects_digits() {
        assert!(CityName::parse("Zürich2").is_err());
    }

    #[test]
    fn rejects_punctuation() {
        assert!(CityName::parse("St. Gallen").is_err());
        assert!(CityName::parse("Biel/Bienne").is_err());
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(CityName::parse("").is_err());
        assert!(CityName::parse("   ").is_err());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let name = CityName::parse("  Bern ").expect("valid");
        assert_eq!(name.as_str(), "Bern");
    }

    #[test]
    fn normalized_lowercases() {
        let name = CityName::parse("Zürich").expect("valid");
        assert_eq!(name.normalized(), "zürich");
    }

    #[test]
    fn display_matches_trimmed_value() {
        let name = CityName::parse(" Paris ").expect("valid");
        assert_eq!(name.to_string(), "Paris");
    }
}
