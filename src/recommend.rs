//! Panel configurations for a required array capacity.

use serde::Serialize;

use crate::catalog::PanelSpec;
use crate::error::{Result, SizingError, ensure_non_negative, ensure_positive};

/// How many panels of one model cover the required capacity, and at what price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelRecommendation {
    pub panel: PanelSpec,
    /// Smallest count whose combined rating covers the requirement.
    pub panel_count: u64,
    /// Installed capacity (kW).
    pub total_capacity_kw: f64,
    /// Panel cost only (naira).
    pub total_cost: f64,
    /// Unit price divided by rated wattage (naira/W).
    pub cost_per_watt: f64,
}

/// Computes one recommendation for a single panel model.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative requirement or a panel with zero
/// wattage or negative price.
pub fn recommend_panel(required_kwp: f64, panel: &PanelSpec) -> Result<PanelRecommendation> {
    let required_kwp = ensure_non_negative("required_kwp", required_kwp)?;
    let watts = ensure_positive(&format!("{}.watt_rating", panel.name), panel.watt_rating)?;
    let price = ensure_non_negative(&format!("{}.unit_price", panel.name), panel.unit_price)?;

    // Work in watts so round kW figures divide exactly.
    let ratio = (required_kwp * 1000.0 / watts).ceil();
    if ratio > u64::MAX as f64 {
        return Err(SizingError::invalid("required_kwp", "too large to cover with panels"));
    }
    let panel_count = ratio as u64;
    let count = panel_count as f64;

    Ok(PanelRecommendation {
        panel: *panel,
        panel_count,
        total_capacity_kw: count * watts / 1000.0,
        total_cost: count * price,
        cost_per_watt: price / watts,
    })
}

/// Computes a recommendation for every catalog panel, cheapest per watt first.
///
/// The sort is stable, so catalog order breaks ties.
pub fn recommend_panels(required_kwp: f64, catalog: &[PanelSpec]) -> Result<Vec<PanelRecommendation>> {
    let mut rows = catalog
        .iter()
        .map(|panel| recommend_panel(required_kwp, panel))
        .collect::<Result<Vec<_>>>()?;
    rows.sort_by(|a, b| a.cost_per_watt.total_cmp(&b.cost_per_watt));
    Ok(rows)
}

/// The row with the lowest cost per watt; the earliest one wins ties.
pub fn best_option(rows: &[PanelRecommendation]) -> Option<&PanelRecommendation> {
    rows.iter()
        .min_by(|a, b| a.cost_per_watt.total_cmp(&b.cost_per_watt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PANELS;

    fn panel(name: &'static str, watts: f64, price: f64) -> PanelSpec {
        PanelSpec {
            name,
            watt_rating: watts,
            unit_price: price,
            efficiency_pct: 20.0,
            warranty_years: 25,
        }
    }

    #[test]
    fn two_kwp_with_400w_panels() {
        let r = recommend_panel(2.0, &panel("P400", 400.0, 100_000.0)).unwrap();
        assert_eq!(r.panel_count, 5);
        assert!((r.total_capacity_kw - 2.0).abs() < 1e-12);
        assert_eq!(r.total_cost, 500_000.0);
        assert_eq!(r.cost_per_watt, 250.0);
    }

    #[test]
    fn never_under_provisions_and_is_minimal() {
        for i in 1..200 {
            let required = f64::from(i) * 0.137;
            for p in PANELS {
                let r = recommend_panel(required, p).unwrap();
                let count = r.panel_count as f64;
                assert!(count * p.watt_rating >= required * 1000.0 - 1e-6);
                assert!((count - 1.0) * p.watt_rating < required * 1000.0);
                assert!(r.panel_count >= 1);
            }
        }
    }

    #[test]
    fn zero_requirement_needs_no_panels() {
        let r = recommend_panel(0.0, &PANELS[0]).unwrap();
        assert_eq!(r.panel_count, 0);
        assert_eq!(r.total_cost, 0.0);
    }

    #[test]
    fn zero_watt_panel_is_invalid() {
        assert!(matches!(
            recommend_panel(1.0, &panel("Broken", 0.0, 1.0)),
            Err(SizingError::InvalidInput { .. })
        ));
        assert!(recommend_panel(-1.0, &PANELS[0]).is_err());
    }

    #[test]
    fn rows_sorted_by_cost_per_watt() {
        let rows = recommend_panels(3.0, PANELS).unwrap();
        assert_eq!(rows.len(), PANELS.len());
        assert!(rows.windows(2).all(|w| w[0].cost_per_watt <= w[1].cost_per_watt));
        assert_eq!(rows[0].panel.name, "Polycrystalline 400W");
    }

    #[test]
    fn best_option_prefers_first_on_tie() {
        let catalog = [panel("A", 400.0, 100_000.0), panel("B", 200.0, 50_000.0)];
        let rows = recommend_panels(1.0, &catalog).unwrap();
        assert_eq!(best_option(&rows).map(|r| r.panel.name), Some("A"));
        assert!(best_option(&[]).is_none());
    }
}
