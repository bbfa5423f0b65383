//! Holdings module - the static portfolio definition and where it is read from.

mod holdings_model;
mod holdings_source;

pub use holdings_model::{parse_holdings, sector_label_or_default, Holding, HoldingRecord};
pub use holdings_source::{HoldingSourceTrait, JsonFileHoldingSource, StaticHoldingSource};
