//! Quote sources.
//!
//! This module contains:
//! - The `QuoteProvider` trait the enrichment pipeline depends on
//! - `QuoteSource`, a cached, timeout-bounded document source
//! - Source presets (Yahoo Finance quote page, Google Finance quote page)
//!
//! # Fetch flow
//!
//! ```text
//! fetch(symbol)
//!     |
//!     v
//! cache hit? --yes--> cached QuoteRecord
//!     | no
//!     v
//! DocumentFetcher (bounded by timeout) --error--> failure record (not cached)
//!     | body
//!     v
//! FieldExtractor --> success record --> cache (source TTL)
//! ```

mod quote_source;
mod traits;

pub mod google;
pub mod yahoo;

pub use quote_source::{QuoteSource, SourceConfig};
pub use traits::QuoteProvider;
