//! Folio Market Data Crate
//!
//! This crate turns unstructured quote pages into structured quote records.
//!
//! # Overview
//!
//! - [`TimedCache`] - process-wide key/value store with per-entry expiry
//! - [`FieldExtractor`] - ordered extraction strategies per field, pure
//! - [`DocumentFetcher`] - the network seam, with a `reqwest` implementation
//! - [`QuoteSource`] - cache + fetcher + extractor behind [`QuoteProvider`]
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  QuoteProvider   |  (what the enrichment pipeline sees)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |   QuoteSource    | --> |   TimedCache     |  (hit: return cached record)
//! +------------------+     +------------------+
//!          | miss
//!          v
//! +------------------+
//! | DocumentFetcher  |  (bounded by timeout; failures are not cached)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  FieldExtractor  |  (first parseable strategy per field wins)
//! +------------------+
//! ```

pub mod cache;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod provider;

pub use cache::{spawn_sweeper, QuoteCache, TimedCache, DEFAULT_TTL};
pub use errors::MarketDataError;
pub use extractor::{parse_decimal, ExtractionStrategy, FieldExtractor};
pub use fetcher::{
    document_headers, DocumentFetcher, HttpFetcher, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
};
pub use models::{QuoteField, QuoteFields, QuoteRecord};
pub use provider::google::{google_config, google_extractor, google_source, GOOGLE_SOURCE_ID};
pub use provider::yahoo::{yahoo_config, yahoo_extractor, yahoo_source, YAHOO_SOURCE_ID};
pub use provider::{QuoteProvider, QuoteSource, SourceConfig};
