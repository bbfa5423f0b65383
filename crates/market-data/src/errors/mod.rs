//! Error types for the market data crate.
//!
//! Every variant here describes a *fetch failure*. Extraction misses are not
//! errors: a field that cannot be read from a document is simply absent.

use thiserror::Error;

/// Errors that can occur while fetching a quote document.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {url}")]
    Timeout {
        /// The URL that was being fetched
        url: String,
    },

    /// The endpoint answered with a non-success status code.
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus {
        /// The HTTP status code
        status: u16,
        /// The URL that was fetched
        url: String,
    },

    /// A provider-specific error occurred (bad configuration, unreadable body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message
        message: String,
    },

    /// The request could not be built (empty symbol, bad endpoint template).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A transport-level error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns true when the failure was caused by the request deadline.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Network(e) => e.is_timeout(),
            _ => false,
        }
    }
}
