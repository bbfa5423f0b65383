use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use super::holdings_model::{parse_holdings, Holding};
use crate::errors::{Error, Result};

/// Read-only supplier of the portfolio definition.
#[async_trait]
pub trait HoldingSourceTrait: Send + Sync {
    /// Returns the holdings in definition order.
    async fn load_holdings(&self) -> Result<Vec<Holding>>;
}

/// Holdings read from a JSON file on every call.
#[derive(Debug, Clone)]
pub struct JsonFileHoldingSource {
    path: PathBuf,
}

impl JsonFileHoldingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HoldingSourceTrait for JsonFileHoldingSource {
    async fn load_holdings(&self) -> Result<Vec<Holding>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::HoldingSource(format!("{}: {}", self.path.display(), e))
        })?;
        let holdings = parse_holdings(&raw)?;
        debug!(
            "Loaded {} holdings from {}",
            holdings.len(),
            self.path.display()
        );
        Ok(holdings)
    }
}

/// Holdings fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticHoldingSource {
    holdings: Vec<Holding>,
}

impl StaticHoldingSource {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }
}

#[async_trait]
impl HoldingSourceTrait for StaticHoldingSource {
    async fn load_holdings(&self) -> Result<Vec<Holding>> {
        Ok(self.holdings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"symbol": "RELIANCE", "name": "Reliance", "purchasePrice": 2450.5, "quantity": 3, "sector": "Energy"}}]"#
        )
        .unwrap();

        let source = JsonFileHoldingSource::new(file.path());
        let holdings = source.load_holdings().await.unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].purchase_price, dec!(2450.5));
        assert_eq!(holdings[0].sector_label(), "Energy");
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileHoldingSource::new(dir.path().join("missing.json"));
        let err = source.load_holdings().await.unwrap_err();
        assert!(matches!(err, Error::HoldingSource(ref msg) if msg.contains("missing.json")));
    }

    #[tokio::test]
    async fn test_invalid_file_is_validation_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"symbol": "X", "purchasePrice": "n/a", "quantity": 1}}]"#).unwrap();

        let err = JsonFileHoldingSource::new(file.path())
            .load_holdings()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidHolding { .. })
        ));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticHoldingSource::new(vec![Holding::new("X", "X", dec!(1), 1)]);
        assert_eq!(source.load_holdings().await.unwrap().len(), 1);
    }
}
