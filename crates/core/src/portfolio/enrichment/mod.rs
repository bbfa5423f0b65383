//! Enrichment - joins static holdings with live quotes.

mod enrichment_model;
mod enrichment_service;


pub use enrichment_model::{apply_portfolio_weights, EnrichedHolding};
pub use enrichment_service::{EnrichmentService, EnrichmentServiceTrait};
