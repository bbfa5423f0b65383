//! Yahoo Finance quote page source (current price).
//!
//! The quote page renders the live price in `<fin-streamer>` elements and
//! embeds the same data as JSON in a script tag. Markup has changed several
//! times, so each field has a chain of fallbacks ending in a raw-JSON pattern.

use std::sync::Arc;

use crate::cache::QuoteCache;
use crate::extractor::{ExtractionStrategy, FieldExtractor};
use crate::fetcher::DocumentFetcher;
use crate::models::QuoteField;

use super::{QuoteSource, SourceConfig};

pub const YAHOO_SOURCE_ID: &str = "yahoo";
pub const YAHOO_QUOTE_URL: &str = "https://finance.yahoo.com/quote/{symbol}";

/// Default configuration: Yahoo records use the cache's default TTL.
pub fn yahoo_config() -> SourceConfig {
    SourceConfig::new(YAHOO_SOURCE_ID, YAHOO_QUOTE_URL)
}

/// Extraction strategies for the Yahoo Finance quote page.
pub fn yahoo_extractor() -> FieldExtractor {
    FieldExtractor::new()
        .with_strategies(
            QuoteField::Price,
            [
                ExtractionStrategy::css(r#"fin-streamer[data-field="regularMarketPrice"]"#),
                ExtractionStrategy::css_attr(
                    r#"fin-streamer[data-field="regularMarketPrice"]"#,
                    "data-value",
                ),
                ExtractionStrategy::css("div#quote-header-info fin-streamer"),
                ExtractionStrategy::css(r#"[data-testid="qsp-price"]"#),
                ExtractionStrategy::pattern(r#""regularMarketPrice":\{"raw":(-?[0-9.eE+-]+)"#),
            ],
        )
        .with_strategies(
            QuoteField::PeRatio,
            [
                ExtractionStrategy::css(r#"[data-test="PE_RATIO-value"]"#),
                ExtractionStrategy::labelled("PE Ratio (TTM)"),
                ExtractionStrategy::pattern(r#""trailingPE":\{"raw":(-?[0-9.eE+-]+)"#),
            ],
        )
        .with_strategies(
            QuoteField::Eps,
            [
                ExtractionStrategy::css(r#"[data-test="EPS_RATIO-value"]"#),
                ExtractionStrategy::labelled("EPS (TTM)"),
                ExtractionStrategy::pattern(r#""epsTrailingTwelveMonths":\{"raw":(-?[0-9.eE+-]+)"#),
                ExtractionStrategy::pattern(r#""trailingEps":\{"raw":(-?[0-9.eE+-]+)"#),
            ],
        )
        .with_strategies(
            QuoteField::Exchange,
            [
                ExtractionStrategy::pattern(r#""fullExchangeName":"([^"]+)""#),
                ExtractionStrategy::pattern(r#""exchangeName":"([^"]+)""#),
            ],
        )
}

/// Yahoo Finance price source.
pub fn yahoo_source(
    config: SourceConfig,
    cache: Arc<QuoteCache>,
    fetcher: Arc<dyn DocumentFetcher>,
) -> QuoteSource {
    QuoteSource::new(config, yahoo_extractor(), cache, fetcher)
}
