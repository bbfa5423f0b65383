//! Portfolio module - enrichment, sector roll-up and the combined view.

pub mod enrichment;
pub mod portfolio_service;
pub mod sectors;

pub use enrichment::{
    apply_portfolio_weights, EnrichedHolding, EnrichmentService, EnrichmentServiceTrait,
};
pub use portfolio_service::{PortfolioService, PortfolioServiceTrait, PortfolioView};
pub use sectors::{aggregate_by_sector, PortfolioTotals, SectorSummary};
