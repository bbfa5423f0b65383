//! Sectors module - roll-up of enriched holdings by sector label.

mod sectors_model;
mod sectors_service;

pub use sectors_model::{PortfolioTotals, SectorSummary};
pub use sectors_service::aggregate_by_sector;
