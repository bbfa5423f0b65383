//! Service producing the full portfolio view: enriched holdings, sector
//! summaries and whole-portfolio totals from a single enrichment pass.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::holdings::HoldingSourceTrait;

use super::enrichment::{EnrichedHolding, EnrichmentServiceTrait};
use super::sectors::{aggregate_by_sector, PortfolioTotals, SectorSummary};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub holdings: Vec<EnrichedHolding>,
    pub sectors: Vec<SectorSummary>,
    pub totals: PortfolioTotals,
    pub generated_at: DateTime<Utc>,
}

impl PortfolioView {
    /// Build the view from an already enriched list.
    pub fn from_enriched(holdings: Vec<EnrichedHolding>) -> Self {
        let sectors = aggregate_by_sector(&holdings);
        let totals = PortfolioTotals::from_sectors(&sectors);
        Self {
            holdings,
            sectors,
            totals,
            generated_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    async fn get_portfolio_view(&self) -> Result<PortfolioView>;
}

pub struct PortfolioService {
    holding_source: Arc<dyn HoldingSourceTrait>,
    enrichment_service: Arc<dyn EnrichmentServiceTrait>,
}

impl PortfolioService {
    pub fn new(
        holding_source: Arc<dyn HoldingSourceTrait>,
        enrichment_service: Arc<dyn EnrichmentServiceTrait>,
    ) -> Self {
        Self {
            holding_source,
            enrichment_service,
        }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn get_portfolio_view(&self) -> Result<PortfolioView> {
        let holdings = self
            .enrichment_service
            .enrich_from_source(self.holding_source.as_ref())
            .await?;
        Ok(PortfolioView::from_enriched(holdings))
    }
}
