//! Core error types for the Folio application.
//!
//! Only request-level failures are errors here: an unreadable holding source
//! or malformed holding data. Quote fetch failures and extraction misses are
//! absorbed by the enrichment pipeline and surface as absent fields.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read holdings: {0}")]
    HoldingSource(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for the portfolio definition.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid holding at index {index} ({symbol}): {reason}")]
    InvalidHolding {
        index: usize,
        symbol: String,
        reason: String,
    },

    #[error("Duplicate symbol in portfolio: {0}")]
    DuplicateSymbol(String),

    #[error("Invalid portfolio document: {0}")]
    InvalidDocument(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::HoldingSource(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidDocument(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_holding_source_error() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::HoldingSource(_)));
    }

    #[test]
    fn test_json_error_is_validation_error() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_invalid_holding_display() {
        let err = Error::Validation(ValidationError::InvalidHolding {
            index: 2,
            symbol: "TCS".to_string(),
            reason: "quantity must be a positive integer".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Input validation failed: Invalid holding at index 2 (TCS): quantity must be a positive integer"
        );
    }
}
