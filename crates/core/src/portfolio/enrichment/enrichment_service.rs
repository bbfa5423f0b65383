//! Service for enriching holdings with live quotes.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, info};

use folio_market_data::QuoteProvider;

use crate::errors::Result;
use crate::holdings::{Holding, HoldingSourceTrait};

use super::{apply_portfolio_weights, EnrichedHolding};

/// Trait for the enrichment pipeline.
#[async_trait]
pub trait EnrichmentServiceTrait: Send + Sync {
    /// Enriches every holding, in input order. Never fails: a holding whose
    /// quotes could not be fetched comes back with its live fields absent.
    async fn enrich(&self, holdings: &[Holding]) -> Vec<EnrichedHolding>;

    /// Loads holdings from `source` and enriches them.
    async fn enrich_from_source(
        &self,
        source: &dyn HoldingSourceTrait,
    ) -> Result<Vec<EnrichedHolding>>;
}

/// Fans out to every quote provider for every holding concurrently, then
/// computes portfolio weights once all fetches are in.
pub struct EnrichmentService {
    providers: Vec<Arc<dyn QuoteProvider>>,
}

impl EnrichmentService {
    /// Providers are merged in the order given: earlier providers win where
    /// both supply a field.
    pub fn new(providers: Vec<Arc<dyn QuoteProvider>>) -> Self {
        Self { providers }
    }

    async fn enrich_holding(&self, holding: &Holding) -> EnrichedHolding {
        let records = join_all(
            self.providers
                .iter()
                .map(|provider| provider.fetch(&holding.symbol)),
        )
        .await;
        debug!(
            "Fetched {} quote record(s) for {}",
            records.len(),
            holding.symbol
        );
        EnrichedHolding::from_quotes(holding.clone(), &records)
    }
}

#[async_trait]
impl EnrichmentServiceTrait for EnrichmentService {
    async fn enrich(&self, holdings: &[Holding]) -> Vec<EnrichedHolding> {
        let mut enriched = join_all(holdings.iter().map(|h| self.enrich_holding(h))).await;

        // Every fetch has completed here; weights need the whole list.
        apply_portfolio_weights(&mut enriched);

        let priced = enriched.iter().filter(|h| h.price.is_some()).count();
        let failed = enriched.iter().filter(|h| h.error.is_some()).count();
        info!(
            "Enriched {} holdings ({} priced, {} with fetch errors)",
            enriched.len(),
            priced,
            failed
        );
        enriched
    }

    async fn enrich_from_source(
        &self,
        source: &dyn HoldingSourceTrait,
    ) -> Result<Vec<EnrichedHolding>> {
        let holdings = source.load_holdings().await?;
        Ok(self.enrich(&holdings).await)
    }
}
