//! Property-based tests for enrichment and sector aggregation.
//!
//! Enriched holdings are built directly from generated holdings and prices,
//! so these run without any quote provider.

use std::str::FromStr;

use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_core::portfolio::apply_portfolio_weights;
use folio_core::{aggregate_by_sector, EnrichedHolding, Holding, PortfolioTotals};
use folio_market_data::QuoteFields;

// =============================================================================
// Generators
// =============================================================================

fn arb_sector() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("".to_string())),
        Just(Some("Tech".to_string())),
        Just(Some("Financials".to_string())),
        Just(Some("Energy".to_string())),
    ]
}

/// Amount in paise/cents, as a two decimal place value.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// A holding together with the live price its quote returned, if any.
fn arb_priced_holding() -> impl Strategy<Value = (Holding, Option<Decimal>)> {
    (
        arb_amount(),
        1u64..10_000,
        arb_sector(),
        proptest::option::of(arb_amount()),
    )
        .prop_map(|(cost, quantity, sector, price)| {
            let mut holding = Holding::new("SYM", "Name", cost, quantity);
            holding.sector = sector;
            (holding, price)
        })
}

fn arb_enriched(max: usize) -> impl Strategy<Value = Vec<EnrichedHolding>> {
    proptest::collection::vec(arb_priced_holding(), 0..=max).prop_map(|rows| {
        let mut enriched: Vec<EnrichedHolding> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (mut holding, price))| {
                holding.symbol = format!("SYM{}", i);
                let fields = QuoteFields {
                    price,
                    ..Default::default()
                };
                EnrichedHolding::new(holding, fields, None, None)
            })
            .collect();
        apply_portfolio_weights(&mut enriched);
        enriched
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Investment is conserved between holdings and sector summaries.
    #[test]
    fn prop_investment_is_conserved(holdings in arb_enriched(30)) {
        let sectors = aggregate_by_sector(&holdings);

        let holding_total: Decimal = holdings.iter().map(|h| h.investment).sum();
        let sector_total: Decimal = sectors.iter().map(|s| s.total_investment).sum();
        prop_assert_eq!(holding_total, sector_total);

        let grouped: usize = sectors.iter().map(|s| s.holdings.len()).sum();
        prop_assert_eq!(grouped, holdings.len());
    }

    /// Live-derived fields are all present or all absent, following price.
    #[test]
    fn prop_derived_fields_follow_price(holdings in arb_enriched(30)) {
        for h in &holdings {
            prop_assert_eq!(h.present_value.is_some(), h.price.is_some());
            prop_assert_eq!(h.gain_loss.is_some(), h.present_value.is_some());
            prop_assert_eq!(h.gain_loss_pct.is_some(), h.gain_loss.is_some());
            if h.present_value.is_none() {
                prop_assert_eq!(h.portfolio_percent.as_str(), "0.00");
            }
        }
    }

    /// Aggregating the flattened output again yields the same sums.
    #[test]
    fn prop_aggregation_is_idempotent(holdings in arb_enriched(30)) {
        let first = aggregate_by_sector(&holdings);
        let flattened: Vec<EnrichedHolding> = first
            .iter()
            .flat_map(|s| s.holdings.iter().cloned())
            .collect();
        let second = aggregate_by_sector(&flattened);

        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert_eq!(&a.sector, &b.sector);
            prop_assert_eq!(a.total_investment, b.total_investment);
            prop_assert_eq!(a.total_present_value, b.total_present_value);
            prop_assert_eq!(a.total_gain_loss, b.total_gain_loss);
            prop_assert_eq!(a.total_gain_loss_pct, b.total_gain_loss_pct);
        }
    }

    /// Weights of priced holdings sum to 100 within rounding.
    #[test]
    fn prop_weights_sum_to_hundred(holdings in arb_enriched(30)) {
        let priced: Vec<&EnrichedHolding> =
            holdings.iter().filter(|h| h.present_value.is_some()).collect();
        prop_assume!(!priced.is_empty());

        let sum: Decimal = priced
            .iter()
            .map(|h| Decimal::from_str(&h.portfolio_percent).unwrap())
            .sum();
        let tolerance = Decimal::new(5, 3) * Decimal::from(priced.len());
        prop_assert!(
            (sum - Decimal::ONE_HUNDRED).abs() <= tolerance,
            "weights summed to {}",
            sum
        );
    }

    /// Sectors are ordered by descending investment, and missing sectors are
    /// reported as "Others".
    #[test]
    fn prop_sector_order_and_labels(holdings in arb_enriched(30)) {
        let sectors = aggregate_by_sector(&holdings);

        for pair in sectors.windows(2) {
            prop_assert!(pair[0].total_investment >= pair[1].total_investment);
        }
        for s in &sectors {
            prop_assert!(!s.sector.is_empty());
        }

        let unlabelled = holdings
            .iter()
            .filter(|h| h.sector.as_deref().map_or(true, |s| s.trim().is_empty()))
            .count();
        let others = sectors
            .iter()
            .find(|s| s.sector == "Others")
            .map_or(0, |s| s.holdings.len());
        prop_assert_eq!(unlabelled, others);
    }

    /// Portfolio totals equal the sums over sectors.
    #[test]
    fn prop_totals_match_sectors(holdings in arb_enriched(30)) {
        let sectors = aggregate_by_sector(&holdings);
        let totals = PortfolioTotals::from_sectors(&sectors);

        let present: Decimal = holdings.iter().filter_map(|h| h.present_value).sum();
        let gain: Decimal = holdings.iter().filter_map(|h| h.gain_loss).sum();
        prop_assert_eq!(totals.total_present_value, present);
        prop_assert_eq!(totals.total_gain_loss, gain);
    }
}
