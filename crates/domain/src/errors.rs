//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// City name failed validation
    #[error("Invalid city name: {0}")]
    InvalidCityName(String),

    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(#[from] crate::value_objects::InvalidCoordinates),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("City", "Atlantis");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "City");
                assert_eq!(id, "Atlantis");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("City", "Atlantis");
        assert_eq!(err.to_string(), "City not found: Atlantis");
    }

    #[test]
    fn invalid_city_name_error_message() {
        let err = DomainError::InvalidCityName("contains digits".to_string());
        assert_eq!(err.to_string(), "Invalid city name: contains digits");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}
