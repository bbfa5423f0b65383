//! Cached, timeout-bounded quote source.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::HeaderMap;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::cache::QuoteCache;
use crate::errors::MarketDataError;
use crate::extractor::FieldExtractor;
use crate::fetcher::{
    document_headers, DocumentFetcher, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::models::QuoteRecord;

use super::traits::QuoteProvider;

/// Placeholder replaced by the encoded symbol in endpoint templates.
pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";

/// Static configuration of one quote source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    /// Source identifier, used in cache keys and records
    pub id: String,
    /// URL template containing `{symbol}`
    pub endpoint_template: String,
    /// Cache TTL for this source's records; `None` uses the cache default
    pub ttl: Option<Duration>,
    /// Upper bound for one fetch
    pub timeout: Duration,
    /// Value sent as the `User-Agent` header
    pub user_agent: String,
}

impl SourceConfig {
    pub fn new(id: impl Into<String>, endpoint_template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            endpoint_template: endpoint_template.into(),
            ttl: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint_template: impl Into<String>) -> Self {
        self.endpoint_template = endpoint_template.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// A named external endpoint, an extractor for its documents, and the cache
/// in front of both.
pub struct QuoteSource {
    config: SourceConfig,
    headers: HeaderMap,
    extractor: FieldExtractor,
    cache: Arc<QuoteCache>,
    fetcher: Arc<dyn DocumentFetcher>,
}

impl QuoteSource {
    pub fn new(
        config: SourceConfig,
        extractor: FieldExtractor,
        cache: Arc<QuoteCache>,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Self {
        let headers = document_headers(&config.user_agent);
        Self {
            config,
            headers,
            extractor,
            cache,
            fetcher,
        }
    }

    /// Cache key for a normalized symbol.
    pub fn cache_key(&self, symbol: &str) -> String {
        format!("{}:{}", self.config.id, symbol)
    }

    /// TTL used when caching this source's records.
    pub fn ttl(&self) -> Duration {
        self.config.ttl.unwrap_or_else(|| self.cache.default_ttl())
    }

    /// Build the request URL for a normalized symbol.
    pub fn endpoint_for(&self, symbol: &str) -> Result<String, MarketDataError> {
        if !self.config.endpoint_template.contains(SYMBOL_PLACEHOLDER) {
            return Err(MarketDataError::InvalidRequest(format!(
                "endpoint template for '{}' has no {} placeholder",
                self.config.id, SYMBOL_PLACEHOLDER
            )));
        }
        Ok(self
            .config
            .endpoint_template
            .replace(SYMBOL_PLACEHOLDER, &encode(symbol)))
    }

    /// Fetch and extract without consulting the cache.
    async fn fetch_live(&self, symbol: &str) -> Result<QuoteRecord, MarketDataError> {
        let url = self.endpoint_for(symbol)?;
        debug!("Fetching {} quote for {} from {}", self.config.id, symbol, url);

        let document =
            match tokio::time::timeout(self.config.timeout, self.fetcher.fetch(&url, &self.headers))
                .await
            {
                Ok(result) => result?,
                Err(_) => return Err(MarketDataError::Timeout { url }),
            };

        let fields = self.extractor.extract(&document, symbol);
        if fields.is_empty() {
            warn!(
                "No fields could be extracted from {} document for {}; the page layout may have changed",
                self.config.id, symbol
            );
        }

        Ok(QuoteRecord::success(
            symbol,
            self.config.id.clone(),
            fields,
            Utc::now(),
        ))
    }
}

/// Normalize user input to the form used in URLs and cache keys.
fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[async_trait]
impl QuoteProvider for QuoteSource {
    fn id(&self) -> &str {
        &self.config.id
    }

    async fn fetch(&self, symbol: &str) -> QuoteRecord {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return QuoteRecord::failure(
                symbol,
                self.config.id.clone(),
                MarketDataError::InvalidRequest("empty symbol".to_string()).to_string(),
                Utc::now(),
            );
        }

        let key = self.cache_key(&symbol);
        if let Some(cached) = self.cache.get(&key) {
            debug!("Cache hit for {}", key);
            return cached;
        }

        match self.fetch_live(&symbol).await {
            Ok(record) => {
                self.cache.set_with_ttl(key, record.clone(), self.ttl());
                record
            }
            Err(e) => {
                // Failures are not cached so the next call retries immediately.
                warn!("{} fetch failed for {}: {}", self.config.id, symbol, e);
                QuoteRecord::failure(symbol, self.config.id.clone(), e.to_string(), Utc::now())
            }
        }
    }
}
