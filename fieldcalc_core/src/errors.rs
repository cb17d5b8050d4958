//! # Error Types
//!
//! Structured error types for fieldcalc_core. Every failure a compute strategy
//! or the state store can produce is a variant here, so callers can match on
//! the cause instead of scraping strings.
//!
//! All errors are recoverable: a failed evaluation only disables save/copy for
//! that one result, and the next input edit re-evaluates from scratch.
//!
//! ## Example
//!
//! ```rust
//! use fieldcalc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_radius(r_mm: f64) -> CalcResult<()> {
//!     if r_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "r_mm",
//!             r_mm.to_string(),
//!             "radius must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fieldcalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for template evaluation and state persistence.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// One or more declared fields have no parseable numeric value
    #[error("Missing or non-numeric field(s): {fields}")]
    MissingInputs { fields: String },

    /// A single input is numerically present but invalid for the formula
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A cross-field precondition is violated (e.g. hypotenuse shorter than a leg)
    #[error("Geometry error: {reason}")]
    Geometry { reason: String },

    /// A compute strategy produced a shape or value the result contract rejects
    #[error("Invalid result: {reason}")]
    MalformedResult { reason: String },

    /// State file I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// State file schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create a MissingInputs error from the offending field keys
    pub fn missing_inputs<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fields
            .into_iter()
            .map(|f| f.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        CalcError::MissingInputs { fields: joined }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Geometry error
    pub fn geometry(reason: impl Into<String>) -> Self {
        CalcError::Geometry {
            reason: reason.into(),
        }
    }

    /// Create a MalformedResult error
    pub fn malformed_result(reason: impl Into<String>) -> Self {
        CalcError::MalformedResult {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::MissingInputs { .. } => "MISSING_INPUTS",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::Geometry { .. } => "GEOMETRY",
            CalcError::MalformedResult { .. } => "MALFORMED_RESULT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("d", "-5.0", "diameter must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_missing_inputs_joins_fields() {
        let error = CalcError::missing_inputs(["d", "L"]);
        assert_eq!(error.to_string(), "Missing or non-numeric field(s): d, L");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_inputs(["x"]).error_code(), "MISSING_INPUTS");
        assert_eq!(CalcError::geometry("c > b required").error_code(), "GEOMETRY");
    }
}
