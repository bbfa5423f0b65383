//! Folio Core
//!
//! Holdings, the enrichment pipeline that joins them with live quotes, and
//! the sector roll-up over the enriched list.
//!
//! ```text
//! HoldingSourceTrait -> EnrichmentService -> aggregate_by_sector -> PortfolioTotals
//!                            |
//!                            v
//!                  QuoteProvider (one or more)
//! ```

pub mod constants;
pub mod errors;
pub mod holdings;
pub mod portfolio;
pub mod utils;

pub use errors::{Error, Result, ValidationError};
pub use holdings::{Holding, HoldingSourceTrait, JsonFileHoldingSource, StaticHoldingSource};
pub use portfolio::{
    aggregate_by_sector, EnrichedHolding, EnrichmentService, EnrichmentServiceTrait,
    PortfolioService, PortfolioServiceTrait, PortfolioTotals, PortfolioView, SectorSummary,
};
