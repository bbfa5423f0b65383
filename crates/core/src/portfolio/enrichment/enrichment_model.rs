use chrono::{DateTime, Utc};
use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use folio_market_data::{QuoteFields, QuoteRecord};

use crate::constants::{PERCENT_DECIMAL_PRECISION, ZERO_PERCENT};
use crate::holdings::{sector_label_or_default, Holding};
use crate::utils::decimal_utils::checked_scaled_sum;

/// A holding joined with its live quote and the figures derived from it.
///
/// `investment` is always present. `present_value`, `gain_loss` and
/// `gain_loss_pct` are present exactly when a price was obtained.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHolding {
    pub symbol: String,
    pub name: String,
    pub purchase_price: Decimal,
    pub quantity: u64,
    pub exchange: Option<String>,
    pub sector: Option<String>,

    // Live quote
    pub price: Option<Decimal>,
    pub pe_ratio: Option<Decimal>,
    pub eps: Option<Decimal>,
    pub last_updated: Option<DateTime<Utc>>,

    // Derived
    pub investment: Decimal,
    pub present_value: Option<Decimal>,
    pub gain_loss: Option<Decimal>,
    pub gain_loss_pct: Option<Decimal>,
    pub portfolio_percent: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EnrichedHolding {
    /// Merge the records of every source queried for `holding`.
    ///
    /// Records are applied in order; a later record only fills fields the
    /// earlier ones left absent. The portfolio weight is left at "0.00" until
    /// [`apply_portfolio_weights`] runs over the whole list.
    pub fn from_quotes(holding: Holding, records: &[QuoteRecord]) -> Self {
        let mut fields = QuoteFields::default();
        for record in records {
            fields.fill_missing(&record.fields);
        }

        let last_updated = records
            .iter()
            .find(|r| r.fields.price.is_some())
            .map(|r| r.timestamp);

        let errors: Vec<String> = records
            .iter()
            .filter_map(|r| r.error.as_ref().map(|e| format!("{}: {}", r.source, e)))
            .collect();
        let error = if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        };

        Self::new(holding, fields, last_updated, error)
    }

    pub fn new(
        holding: Holding,
        mut fields: QuoteFields,
        last_updated: Option<DateTime<Utc>>,
        mut error: Option<String>,
    ) -> Self {
        let investment = holding.investment();
        let live = fields.price.and_then(|price| {
            let live = LiveValues::compute(price, holding.quantity, investment);
            if live.is_none() {
                warn!(
                    "Discarding price {} for {}: value of {} units is not representable",
                    price, holding.symbol, holding.quantity
                );
                let message = format!("price {} overflows present value", price);
                error = Some(match error.take() {
                    Some(existing) => format!("{}; {}", existing, message),
                    None => message,
                });
            }
            live
        });
        if live.is_none() {
            fields.price = None;
        }
        let last_updated = fields.price.and(last_updated);

        Self {
            exchange: fields.exchange.or(holding.exchange),
            symbol: holding.symbol,
            name: holding.name,
            purchase_price: holding.purchase_price,
            quantity: holding.quantity,
            sector: holding.sector,
            price: fields.price,
            pe_ratio: fields.pe_ratio,
            eps: fields.eps,
            last_updated,
            investment,
            present_value: live.map(|l| l.present_value),
            gain_loss: live.map(|l| l.gain_loss),
            gain_loss_pct: live.map(|l| l.gain_loss_pct),
            portfolio_percent: ZERO_PERCENT.to_string(),
            error,
        }
    }

    /// Sector used for grouping. Blank or missing sectors fall into "Others".
    pub fn sector_label(&self) -> &str {
        sector_label_or_default(self.sector.as_deref())
    }
}

/// Figures derived from a live price. All present or none.
#[derive(Clone, Copy)]
struct LiveValues {
    present_value: Decimal,
    gain_loss: Decimal,
    gain_loss_pct: Decimal,
}

impl LiveValues {
    /// `None` when any figure does not fit a `Decimal`.
    fn compute(price: Decimal, quantity: u64, investment: Decimal) -> Option<Self> {
        let present_value = price.checked_mul(Decimal::from(quantity))?;
        let gain_loss = present_value.checked_sub(investment)?;
        let gain_loss_pct = if investment.is_zero() {
            Decimal::ZERO
        } else {
            gain_loss
                .checked_div(investment)?
                .checked_mul(dec!(100))?
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };
        Some(Self {
            present_value,
            gain_loss,
            gain_loss_pct,
        })
    }
}

/// Set every holding's portfolio weight from the total present value.
///
/// Must only run once every holding in `holdings` has its quotes; a weight
/// depends on the whole list. When the plain total overflows, every value is
/// scaled down before summing, which leaves the shares unchanged.
pub fn apply_portfolio_weights(holdings: &mut [EnrichedHolding]) {
    let values: Vec<Decimal> = holdings.iter().filter_map(|h| h.present_value).collect();
    let scaled_total = checked_scaled_sum(&values, Decimal::ONE)
        .map(|total| (Decimal::ONE, total))
        .or_else(|| {
            let scale = Decimal::from(values.len()) + Decimal::ONE;
            checked_scaled_sum(&values, scale).map(|total| (scale, total))
        });
    if scaled_total.is_none() {
        warn!("Total present value is not representable, reporting 0.00 weights");
    }

    for holding in holdings.iter_mut() {
        holding.portfolio_percent = match (holding.present_value, scaled_total) {
            (Some(value), Some((scale, total))) if !total.is_zero() => {
                share_percent(value, scale, total)
                    .map(format_percent)
                    .unwrap_or_else(|| ZERO_PERCENT.to_string())
            }
            _ => ZERO_PERCENT.to_string(),
        };
    }
}

fn share_percent(value: Decimal, scale: Decimal, total: Decimal) -> Option<Decimal> {
    value
        .checked_div(scale)?
        .checked_div(total)?
        .checked_mul(dec!(100))
}

fn format_percent(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(
        PERCENT_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    rounded.rescale(PERCENT_DECIMAL_PRECISION);
    rounded.to_string()
}
