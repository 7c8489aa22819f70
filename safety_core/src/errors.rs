//! # Error Types
//!
//! Structured error types for safety_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Validation failures always name the offending field and the acceptable
//! range or allowed set, so a presentation layer can highlight the exact
//! control that needs correcting.
//!
//! ## Example
//!
//! ```rust
//! use safety_core::errors::{SafetyError, SafetyResult};
//!
//! fn validate_noise_level(level_db: f64) -> SafetyResult<()> {
//!     if !(50.0..=140.0).contains(&level_db) {
//!         return Err(SafetyError::invalid_input(
//!             "noise_level_db",
//!             level_db.to_string(),
//!             "Noise level must be between 50 and 140 dB",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for safety_core operations
pub type SafetyResult<T> = Result<T, SafetyError>;

/// Structured error type for assessment operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SafetyError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A constraint spanning two or more fields is violated
    /// (e.g., lost-time injuries exceeding recordable injuries)
    #[error("Constraint violated for '{field}': {constraint}")]
    ConstraintViolated { field: String, constraint: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SafetyError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SafetyError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        SafetyError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ConstraintViolated error
    pub fn constraint_violated(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        SafetyError::ConstraintViolated {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SafetyError::InvalidInput { .. } => "INVALID_INPUT",
            SafetyError::MissingField { .. } => "MISSING_FIELD",
            SafetyError::ConstraintViolated { .. } => "CONSTRAINT_VIOLATED",
            SafetyError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SafetyError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SafetyError::invalid_input(
            "fall_height_m",
            "-2.0",
            "Fall height must be positive",
        );
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SafetyError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SafetyError::missing_field("hazards").error_code(),
            "MISSING_FIELD"
        );
        assert_eq!(
            SafetyError::constraint_violated(
                "lost_time_injuries",
                "cannot exceed recordable injuries"
            )
            .error_code(),
            "CONSTRAINT_VIOLATED"
        );
    }

    #[test]
    fn test_error_display() {
        let error = SafetyError::invalid_input("humidity_pct", "120", "must be 0-100");
        let text = error.to_string();
        assert!(text.contains("humidity_pct"));
        assert!(text.contains("120"));
    }
}
