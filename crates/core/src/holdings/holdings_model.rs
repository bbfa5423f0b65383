use std::collections::HashSet;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use folio_market_data::parse_decimal;

use crate::constants::DEFAULT_SECTOR;
use crate::errors::{Error, Result, ValidationError};

/// One line of the portfolio definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub purchase_price: Decimal,
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        purchase_price: Decimal,
        quantity: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            purchase_price,
            quantity,
            exchange: None,
            sector: None,
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    /// Sector used for grouping. Blank or missing sectors fall into "Others".
    pub fn sector_label(&self) -> &str {
        sector_label_or_default(self.sector.as_deref())
    }

    /// Purchase price times quantity, or `None` when it does not fit a
    /// `Decimal`.
    pub fn checked_investment(&self) -> Option<Decimal> {
        self.purchase_price
            .checked_mul(Decimal::from(self.quantity))
    }

    /// Purchase price times quantity. Validated holdings always fit; a
    /// hand-built holding that overflows saturates at `Decimal::MAX`.
    pub fn investment(&self) -> Decimal {
        self.checked_investment().unwrap_or(Decimal::MAX)
    }
}

/// Grouping label for an optional sector. Blank or missing is "Others".
pub fn sector_label_or_default(sector: Option<&str>) -> &str {
    sector
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SECTOR)
}

/// A portfolio entry as it appears on disk, before validation.
///
/// Numbers are kept as raw JSON values so that strings such as `"1,250.50"`
/// can be accepted and anything else rejected with a useful message.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRecord {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, alias = "particulars")]
    pub name: Option<String>,
    #[serde(default, alias = "purchase_price")]
    pub purchase_price: Option<Value>,
    #[serde(default, alias = "qty")]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

impl HoldingRecord {
    /// Validate the record found at `index` of the portfolio definition.
    pub fn validate(self, index: usize) -> Result<Holding> {
        let symbol = self
            .symbol
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_uppercase();
        let invalid = |reason: &str| {
            Error::Validation(ValidationError::InvalidHolding {
                index,
                symbol: symbol.clone(),
                reason: reason.to_string(),
            })
        };

        if symbol.is_empty() {
            return Err(invalid("symbol is required"));
        }

        let purchase_price = self
            .purchase_price
            .as_ref()
            .and_then(value_to_decimal)
            .ok_or_else(|| invalid("purchase price must be a number"))?;
        if purchase_price <= Decimal::ZERO {
            return Err(invalid("purchase price must be positive"));
        }

        let quantity = self
            .quantity
            .as_ref()
            .and_then(value_to_quantity)
            .ok_or_else(|| invalid("quantity must be a positive integer"))?;

        if purchase_price
            .checked_mul(Decimal::from(quantity))
            .is_none()
        {
            return Err(invalid("purchase price times quantity is too large"));
        }

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| symbol.clone());

        Ok(Holding {
            symbol,
            name,
            purchase_price,
            quantity,
            exchange: non_blank(self.exchange),
            sector: non_blank(self.sector),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

fn value_to_quantity(value: &Value) -> Option<u64> {
    let quantity = value_to_decimal(value)?;
    if quantity <= Decimal::ZERO || !quantity.fract().is_zero() {
        return None;
    }
    quantity.to_u64()
}

/// Parse and validate a portfolio definition.
///
/// Accepts a bare JSON array of holdings or an object wrapping one under
/// `portfolio` or `holdings`. Symbols must be unique.
pub fn parse_holdings(json: &str) -> Result<Vec<Holding>> {
    let document: Value = serde_json::from_str(json)?;
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map
            .remove("portfolio")
            .or_else(|| map.remove("holdings"))
        {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(ValidationError::InvalidDocument(
                    "expected a 'portfolio' or 'holdings' array".to_string(),
                )
                .into())
            }
        },
        _ => {
            return Err(ValidationError::InvalidDocument(
                "expected an array of holdings".to_string(),
            )
            .into())
        }
    };

    let mut seen = HashSet::new();
    let mut holdings = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let record: HoldingRecord = serde_json::from_value(entry)?;
        let holding = record.validate(index)?;
        if !seen.insert(holding.symbol.clone()) {
            return Err(ValidationError::DuplicateSymbol(holding.symbol).into());
        }
        holdings.push(holding);
    }
    Ok(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_array() {
        let json = r#"[
            {"symbol": "hdfcbank", "name": "HDFC Bank", "purchasePrice": 1490, "quantity": 50, "exchange": "NSE", "sector": "Financials"},
            {"symbol": "TCS", "particulars": "Tata Consultancy", "purchasePrice": "3,200.50", "quantity": "10"}
        ]"#;
        let holdings = parse_holdings(json).unwrap();

        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[0].symbol, "HDFCBANK");
        assert_eq!(holdings[0].exchange.as_deref(), Some("NSE"));
        assert_eq!(holdings[0].sector_label(), "Financials");
        assert_eq!(holdings[1].name, "Tata Consultancy");
        assert_eq!(holdings[1].purchase_price, dec!(3200.50));
        assert_eq!(holdings[1].quantity, 10);
        assert_eq!(holdings[1].sector_label(), DEFAULT_SECTOR);
    }

    #[test]
    fn test_parse_wrapped_document() {
        let json = r#"{"portfolio": [{"symbol": "INFY", "purchasePrice": 1500.25, "quantity": 4}]}"#;
        let holdings = parse_holdings(json).unwrap();
        assert_eq!(holdings[0].name, "INFY");
        assert_eq!(holdings[0].investment(), dec!(6001.00));
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let json = r#"[{"symbol": "X", "purchasePrice": "abc", "quantity": 1}]"#;
        let err = parse_holdings(json).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidHolding { index: 0, .. })
        ));
    }

    #[test]
    fn test_fractional_quantity_is_rejected() {
        let json = r#"[{"symbol": "X", "purchasePrice": 10, "quantity": 1.5}]"#;
        assert!(parse_holdings(json).is_err());
        let json = r#"[{"symbol": "X", "purchasePrice": 10, "quantity": 0}]"#;
        assert!(parse_holdings(json).is_err());
        let json = r#"[{"symbol": "X", "purchasePrice": 10, "quantity": 3.0}]"#;
        assert_eq!(parse_holdings(json).unwrap()[0].quantity, 3);
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let json = r#"[{"symbol": "X", "purchasePrice": -5, "quantity": 1}]"#;
        assert!(parse_holdings(json).is_err());
    }

    #[test]
    fn test_overflowing_investment_is_rejected() {
        let json = r#"[{"symbol": "X", "purchasePrice": "79,228,162,514,264,337,593,543,950,335", "quantity": 2}]"#;
        let err = parse_holdings(json).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidHolding { ref reason, .. }) if reason.contains("too large")
        ));

        let json = r#"[{"symbol": "X", "purchasePrice": "79,228,162,514,264,337,593,543,950,335", "quantity": 1}]"#;
        assert_eq!(parse_holdings(json).unwrap()[0].investment(), Decimal::MAX);
    }

    #[test]
    fn test_missing_symbol_is_rejected() {
        let json = r#"[{"symbol": "  ", "purchasePrice": 5, "quantity": 1}]"#;
        assert!(parse_holdings(json).is_err());
    }

    #[test]
    fn test_duplicate_symbol_is_rejected() {
        let json = r#"[
            {"symbol": "x", "purchasePrice": 5, "quantity": 1},
            {"symbol": "X", "purchasePrice": 6, "quantity": 2}
        ]"#;
        let err = parse_holdings(json).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateSymbol(ref s)) if s == "X"
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse_holdings("not json").is_err());
        assert!(parse_holdings(r#"{"other": []}"#).is_err());
        assert!(parse_holdings("42").is_err());
        assert!(parse_holdings("[]").unwrap().is_empty());
    }

    #[test]
    fn test_blank_sector_falls_back() {
        let holding = Holding::new("X", "X", dec!(1), 1).with_sector("   ");
        assert_eq!(holding.sector_label(), "Others");
        assert_eq!(sector_label_or_default(None), "Others");
        assert_eq!(sector_label_or_default(Some(" Tech ")), "Tech");
    }
}
