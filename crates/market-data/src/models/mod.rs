//! Market data models
//!
//! - `field` - The quote fields an extractor knows how to read (QuoteField)
//! - `quote` - Extracted field sets and stamped quote records (QuoteFields, QuoteRecord)

mod field;
mod quote;

pub use field::QuoteField;
pub use quote::{QuoteFields, QuoteRecord};
