//! Best-effort field extraction from quote documents.
//!
//! A [`FieldExtractor`] holds an ordered list of [`ExtractionStrategy`] per
//! [`QuoteField`]. For each field the strategies are tried in order and the
//! first candidate that parses wins. When every strategy fails the field is
//! left absent; extraction as a whole never fails.
//!
//! Extraction is a pure function of the document: no network, no cache, no
//! clock. Source-specific strategy lists live next to the sources that use
//! them (see `provider::yahoo` and `provider::google`).

mod parse;
mod strategy;

use std::collections::BTreeMap;

use scraper::Html;
use tracing::{trace, warn};

use crate::models::{QuoteField, QuoteFields};

pub use parse::{normalize_whitespace, parse_decimal, parse_text};
pub use strategy::ExtractionStrategy;

use strategy::Document;

/// Ordered extraction strategies per quote field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldExtractor {
    strategies: BTreeMap<QuoteField, Vec<ExtractionStrategy>>,
}

impl FieldExtractor {
    /// An extractor with no strategies; every field extracts as absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy for `field`, after any already registered.
    ///
    /// Strategies whose selector or regex does not compile are dropped with a
    /// warning.
    pub fn with_strategy(mut self, field: QuoteField, strategy: ExtractionStrategy) -> Self {
        self.push_strategy(field, strategy);
        self
    }

    /// Append several strategies for `field`, in order.
    pub fn with_strategies(
        mut self,
        field: QuoteField,
        strategies: impl IntoIterator<Item = ExtractionStrategy>,
    ) -> Self {
        for strategy in strategies {
            self.push_strategy(field, strategy);
        }
        self
    }

    pub fn push_strategy(&mut self, field: QuoteField, strategy: ExtractionStrategy) {
        if let Err(e) = strategy.validate() {
            warn!("Skipping {} extraction strategy: {}", field, e);
            return;
        }
        self.strategies.entry(field).or_default().push(strategy);
    }

    pub fn strategies_for(&self, field: QuoteField) -> &[ExtractionStrategy] {
        self.strategies
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Extract every field this extractor has strategies for.
    pub fn extract(&self, document: &str, symbol: &str) -> QuoteFields {
        let html = Html::parse_document(document);
        let document = Document {
            raw: document,
            html: &html,
        };

        let fields = QuoteFields {
            price: self.resolve(QuoteField::Price, &document, parse_decimal),
            pe_ratio: self.resolve(QuoteField::PeRatio, &document, parse_decimal),
            eps: self.resolve(QuoteField::Eps, &document, parse_decimal),
            exchange: self.resolve(QuoteField::Exchange, &document, parse_text),
        };

        trace!("Extracted fields for {}: {:?}", symbol, fields);
        fields
    }

    /// First parseable candidate across the field's strategies, in order.
    fn resolve<T>(
        &self,
        field: QuoteField,
        document: &Document<'_>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        self.strategies_for(field).iter().find_map(|strategy| {
            strategy
                .candidates(document)
                .iter()
                .find_map(|candidate| parse(candidate))
        })
    }
}
