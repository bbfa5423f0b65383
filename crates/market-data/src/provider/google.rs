//! Google Finance quote page source (valuation ratios).
//!
//! Key statistics are rendered as label/value rows; the value is the next
//! sibling of the label's wrapper, with a tooltip in between. Ratios change
//! slowly, so this source caches for longer than the price source.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::QuoteCache;
use crate::extractor::{ExtractionStrategy, FieldExtractor};
use crate::fetcher::DocumentFetcher;
use crate::models::QuoteField;

use super::{QuoteSource, SourceConfig};

pub const GOOGLE_SOURCE_ID: &str = "google";
pub const GOOGLE_QUOTE_URL: &str = "https://www.google.com/finance/quote/{symbol}";

/// Default cache TTL for Google records.
pub const GOOGLE_TTL: Duration = Duration::from_secs(30);

pub fn google_config() -> SourceConfig {
    SourceConfig::new(GOOGLE_SOURCE_ID, GOOGLE_QUOTE_URL).with_ttl(GOOGLE_TTL)
}

/// Extraction strategies for the Google Finance quote page.
pub fn google_extractor() -> FieldExtractor {
    FieldExtractor::new()
        .with_strategies(
            QuoteField::PeRatio,
            [
                ExtractionStrategy::labelled("P/E ratio"),
                ExtractionStrategy::pattern(r#"(?s)P/E ratio<.*?class="P6K39c">([^<]+)<"#),
            ],
        )
        .with_strategies(
            QuoteField::Eps,
            [
                ExtractionStrategy::labelled("Earnings per share"),
                ExtractionStrategy::labelled("EPS"),
            ],
        )
        .with_strategies(
            QuoteField::Price,
            [
                ExtractionStrategy::css_attr("[data-last-price]", "data-last-price"),
                ExtractionStrategy::css("div.YMlKec.fxKbKc"),
            ],
        )
        .with_strategies(
            QuoteField::Exchange,
            [
                ExtractionStrategy::css_attr("[data-exchange]", "data-exchange"),
                ExtractionStrategy::labelled("Primary exchange"),
            ],
        )
}

/// Google Finance valuation-ratio source.
pub fn google_source(
    config: SourceConfig,
    cache: Arc<QuoteCache>,
    fetcher: Arc<dyn DocumentFetcher>,
) -> QuoteSource {
    QuoteSource::new(config, google_extractor(), cache, fetcher)
}
