use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::enrichment::EnrichedHolding;
use crate::utils::decimal_utils::{accumulate, ratio_or_zero};

/// Sums for one sector.
///
/// `total_present_value` and `total_gain_loss` only include holdings that
/// have a price, while `total_investment` includes every holding. Sums
/// saturate at the decimal range instead of overflowing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectorSummary {
    pub sector: String,
    pub total_investment: Decimal,
    pub total_present_value: Decimal,
    pub total_gain_loss: Decimal,
    /// `total_gain_loss / total_investment`, or zero when nothing was invested.
    pub total_gain_loss_pct: Decimal,
    #[serde(rename = "stocks")]
    pub holdings: Vec<EnrichedHolding>,
}

impl SectorSummary {
    pub fn new(sector: impl Into<String>) -> Self {
        Self {
            sector: sector.into(),
            total_investment: Decimal::ZERO,
            total_present_value: Decimal::ZERO,
            total_gain_loss: Decimal::ZERO,
            total_gain_loss_pct: Decimal::ZERO,
            holdings: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, holding: EnrichedHolding) {
        accumulate(
            &mut self.total_investment,
            holding.investment,
            "sector investment",
        );
        if let Some(value) = holding.present_value {
            accumulate(&mut self.total_present_value, value, "sector present value");
        }
        if let Some(gain) = holding.gain_loss {
            accumulate(&mut self.total_gain_loss, gain, "sector gain/loss");
        }
        self.holdings.push(holding);
    }

    pub(crate) fn finish(&mut self) {
        self.total_gain_loss_pct = ratio_or_zero(self.total_gain_loss, self.total_investment);
    }
}

/// Whole-portfolio figures, summed over sector summaries.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub total_investment: Decimal,
    pub total_present_value: Decimal,
    pub total_gain_loss: Decimal,
    pub total_gain_loss_pct: Decimal,
}

impl PortfolioTotals {
    pub fn from_sectors(sectors: &[SectorSummary]) -> Self {
        let mut totals = sectors.iter().fold(Self::default(), |mut acc, s| {
            accumulate(&mut acc.total_investment, s.total_investment, "total investment");
            accumulate(
                &mut acc.total_present_value,
                s.total_present_value,
                "total present value",
            );
            accumulate(&mut acc.total_gain_loss, s.total_gain_loss, "total gain/loss");
            acc
        });
        totals.total_gain_loss_pct =
            ratio_or_zero(totals.total_gain_loss, totals.total_investment);
        totals
    }
}
