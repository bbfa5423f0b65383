use std::collections::HashMap;

use log::debug;

use super::SectorSummary;
use crate::portfolio::enrichment::EnrichedHolding;

/// Group enriched holdings by sector label.
///
/// Holdings without a sector go to "Others". Sectors come back by descending
/// total investment, ties broken by label; holdings keep their input order
/// within a sector. Every call recomputes from scratch.
pub fn aggregate_by_sector(holdings: &[EnrichedHolding]) -> Vec<SectorSummary> {
    let mut by_sector: HashMap<String, SectorSummary> = HashMap::new();

    for holding in holdings {
        let label = holding.sector_label();
        by_sector
            .entry(label.to_string())
            .or_insert_with(|| SectorSummary::new(label))
            .add(holding.clone());
    }

    let mut sectors: Vec<SectorSummary> = by_sector
        .into_values()
        .map(|mut summary| {
            summary.finish();
            summary
        })
        .collect();

    sectors.sort_by(|a, b| {
        b.total_investment
            .cmp(&a.total_investment)
            .then_with(|| a.sector.cmp(&b.sector))
    });

    debug!(
        "Aggregated {} holdings into {} sectors",
        holdings.len(),
        sectors.len()
    );
    sectors
}
