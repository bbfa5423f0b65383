//! The network fetch capability used by quote sources.
//!
//! [`DocumentFetcher`] is the seam between quote sources and the network:
//! production code uses [`HttpFetcher`], tests substitute in-memory fetchers.

mod headers;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use tracing::debug;

use crate::errors::MarketDataError;

pub use headers::{document_headers, DEFAULT_USER_AGENT};

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a raw document body from a URL.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch `url` with `headers`, returning the body on a 2xx response.
    ///
    /// Timeouts, transport errors and non-success statuses are all errors.
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<String, MarketDataError>;
}

/// [`DocumentFetcher`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketDataError::ProviderError {
                provider: "http".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<String, MarketDataError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    url: url.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })
    }
}
