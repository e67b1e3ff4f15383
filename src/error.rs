//! Custom error types for the expense ledger
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{ExpenseValidationError, PeriodParseError};

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Expense form failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ExpenseValidationError),

    /// A year/month pair that does not name a calendar month
    #[error("Invalid period: {0}")]
    InvalidPeriod(#[from] PeriodParseError),

    /// A mutation was attempted before any period was loaded
    #[error("No period loaded")]
    NotLoaded,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A short identifier matched more than one entity
    #[error("Ambiguous {entity_type} ID '{identifier}', use more characters")]
    Ambiguous {
        entity_type: &'static str,
        identifier: String,
    },
}

impl LedgerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::expense_not_found("abc");
        assert_eq!(err.to_string(), "Expense not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_conversion() {
        let err: LedgerError =
            ExpenseValidationError::MissingFields(vec![Field::Title, Field::Price]).into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: Please fill in the following fields: title, price"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LedgerError = io_err.into();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
