//! Quote provider trait definitions.

use async_trait::async_trait;

use crate::models::QuoteRecord;

/// Something that can produce a quote record for a symbol.
///
/// Implementations absorb their own failures: `fetch` always returns a
/// record, and a failed lookup is a record with `error` set and every data
/// field absent.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "yahoo" or "google".
    ///
    /// Used for cache keys, logging and the `source` field of records.
    fn id(&self) -> &str;

    /// Fetch the quote record for `symbol`.
    async fn fetch(&self, symbol: &str) -> QuoteRecord;
}
