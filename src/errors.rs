//! Engine error types
//!
//! Error codes:
//! - ROWSIFT_CONTRACT_VIOLATION
//! - ROWSIFT_TYPE_MISMATCH
//! - ROWSIFT_NUMERIC_CONVERSION
//! - ROWSIFT_INVALID_CONFIG
//!
//! All errors propagate synchronously to the immediate caller. The engine
//! never retries and never recovers internally.

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the analytical engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A criterion, filter spec or argument broke the caller contract
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Two values of incompatible types were compared
    #[error("Type mismatch on field '{field}': cannot compare {left} with {right}")]
    TypeMismatch {
        field: String,
        left: &'static str,
        right: &'static str,
    },

    /// A value could not be coerced to a number
    #[error("Numeric conversion failed on field '{field}': {value}")]
    NumericConversion { field: String, value: String },

    /// Engine configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Create a contract violation error
    pub fn contract(reason: impl Into<String>) -> Self {
        EngineError::ContractViolation(reason.into())
    }

    /// Create a type mismatch error
    pub fn type_mismatch(field: &str, left: &'static str, right: &'static str) -> Self {
        EngineError::TypeMismatch {
            field: field.to_string(),
            left,
            right,
        }
    }

    /// Create a numeric conversion error
    pub fn numeric_conversion(field: &str, value: impl Into<String>) -> Self {
        EngineError::NumericConversion {
            field: field.to_string(),
            value: value.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ContractViolation(_) => "ROWSIFT_CONTRACT_VIOLATION",
            EngineError::TypeMismatch { .. } => "ROWSIFT_TYPE_MISMATCH",
            EngineError::NumericConversion { .. } => "ROWSIFT_NUMERIC_CONVERSION",
            EngineError::InvalidConfig(_) => "ROWSIFT_INVALID_CONFIG",
        }
    }

    /// Returns the offending field, if the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::TypeMismatch { field, .. } => Some(field),
            EngineError::NumericConversion { field, .. } => Some(field),
            _ => None,
        }
    }
}
