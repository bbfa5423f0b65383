use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Best-effort set of fields read from one quote document.
///
/// Every field is optional: a document that lacks a field, or carries it in
/// an unparseable form, leaves it `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFields {
    /// Current market price
    pub price: Option<Decimal>,
    /// Price to trailing earnings ratio
    pub pe_ratio: Option<Decimal>,
    /// Trailing earnings per share
    pub eps: Option<Decimal>,
    /// Listing exchange label
    pub exchange: Option<String>,
}

impl QuoteFields {
    /// True when no field could be extracted.
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.pe_ratio.is_none()
            && self.eps.is_none()
            && self.exchange.is_none()
    }

    /// Fill every absent field from `other`. Fields already present are kept.
    pub fn fill_missing(&mut self, other: &QuoteFields) {
        if self.price.is_none() {
            self.price = other.price;
        }
        if self.pe_ratio.is_none() {
            self.pe_ratio = other.pe_ratio;
        }
        if self.eps.is_none() {
            self.eps = other.eps;
        }
        if self.exchange.is_none() {
            self.exchange = other.exchange.clone();
        }
    }
}

/// Quote for one symbol as returned by a single source.
///
/// A record is either a success (fields as extracted, `error` is `None`) or a
/// failure (all fields absent, `error` carries the reason). Records are never
/// mutated once built; a newer fetch produces a new record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub symbol: String,

    #[serde(flatten)]
    pub fields: QuoteFields,

    /// When the source was queried
    pub timestamp: DateTime<Utc>,

    /// Identifier of the source that produced the record ("yahoo", "google", ...)
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuoteRecord {
    pub fn success(
        symbol: impl Into<String>,
        source: impl Into<String>,
        fields: QuoteFields,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            fields,
            timestamp,
            source: source.into(),
            error: None,
        }
    }

    pub fn failure(
        symbol: impl Into<String>,
        source: impl Into<String>,
        error: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            fields: QuoteFields::default(),
            timestamp,
            source: source.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
