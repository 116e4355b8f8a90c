//! End-to-end estimate for a working set: load, sizing, panels, cost and savings.

use serde::Serialize;

use crate::catalog::{PANELS, PanelSpec, ResolvedLocation};
use crate::config::{PricingConfig, SiteConfig};
use crate::costing::{
    CostBreakdown, ReturnOnInvestment, catalog_cost, monthly_generator_cost, quick_budget,
    return_on_investment,
};
use crate::error::Result;
use crate::load::{LoadLine, LoadProfile, WorkingSet, load_breakdown};
use crate::optimizer::{OptimizationReport, optimize};
use crate::recommend::{PanelRecommendation, best_option, recommend_panels};
use crate::sizing::{Sizer, SizingResult};

/// Everything derived from one working set at one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemEstimate {
    pub location: ResolvedLocation,
    pub autonomy_days: u32,
    pub load: LoadProfile,
    pub breakdown: Vec<LoadLine>,
    /// Energy demand over a billing month (kWh).
    pub monthly_kwh: f64,
    /// Cost of the same energy from a generator (naira/month).
    pub monthly_generator_cost: f64,
    pub sizing: SizingResult,
    /// One row per catalog panel, cheapest per watt first.
    pub panels: Vec<PanelRecommendation>,
    /// Cheapest-per-watt row; `None` only for an empty catalog.
    pub best_panel: Option<PanelRecommendation>,
    /// Cost built on `best_panel`; zero when there is no best panel.
    pub cost: CostBreakdown,
    pub roi: ReturnOnInvestment,
    /// Rule-of-thumb turnkey budget for the required capacity (naira).
    pub quick_budget: f64,
}

/// Site settings shared by every estimate in a session.
#[derive(Debug, Clone)]
pub struct Estimator {
    pub location: String,
    pub autonomy_days: u32,
    pub max_budget: f64,
    pub sizer: Sizer,
    pub pricing: PricingConfig,
    pub panels: &'static [PanelSpec],
}

impl Estimator {
    /// Builds an estimator from a validated configuration.
    pub fn from_config(cfg: &SiteConfig) -> Self {
        Self {
            location: cfg.site.location.clone(),
            autonomy_days: cfg.site.autonomy_days,
            max_budget: cfg.site.max_budget,
            sizer: cfg.sizing.sizer(),
            pricing: cfg.pricing.clone(),
            panels: PANELS,
        }
    }

    /// Runs load, sizing, panel recommendation, costing and ROI for `set`.
    ///
    /// An empty working set yields a zero-demand estimate.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from each stage.
    pub fn estimate(&self, set: &WorkingSet) -> Result<SystemEstimate> {
        let load = set.profile()?;
        let breakdown = load_breakdown(set)?;
        let (location, sizing) =
            self.sizer
                .size(load.total_daily_kwh, &self.location, self.autonomy_days)?;
        let panels = recommend_panels(sizing.required_kwp, self.panels)?;
        let best_panel = best_option(&panels).copied();
        let cost = match &best_panel {
            Some(best) => catalog_cost(best, &sizing, &self.pricing)?,
            None => CostBreakdown::default(),
        };
        let roi = return_on_investment(load.total_daily_kwh, cost.total_cost, &self.pricing)?;

        Ok(SystemEstimate {
            location,
            autonomy_days: self.autonomy_days,
            monthly_kwh: load.monthly_kwh(self.pricing.days_per_month),
            monthly_generator_cost: monthly_generator_cost(load.total_daily_kwh, &self.pricing)?,
            load,
            breakdown,
            quick_budget: quick_budget(sizing.required_kwp, &self.pricing)?,
            sizing,
            panels,
            best_panel,
            cost,
            roi,
        })
    }

    /// Runs the scenario optimizer with this estimator's site and budget.
    pub fn optimize(&self, set: &WorkingSet) -> Result<OptimizationReport> {
        optimize(
            set,
            &self.sizer,
            &self.location,
            self.autonomy_days,
            self.max_budget,
            &self.pricing,
        )
    }
}
