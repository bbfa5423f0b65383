use serde::{Deserialize, Serialize};

/// A single field that can be read out of a quote document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteField {
    /// Current market price
    Price,
    /// Price to trailing earnings ratio
    PeRatio,
    /// Trailing twelve month earnings per share
    Eps,
    /// Listing exchange label (e.g. "NSE", "NasdaqGS")
    Exchange,
}

impl QuoteField {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteField::Price => "price",
            QuoteField::PeRatio => "peRatio",
            QuoteField::Eps => "eps",
            QuoteField::Exchange => "exchange",
        }
    }
}

impl std::fmt::Display for QuoteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
