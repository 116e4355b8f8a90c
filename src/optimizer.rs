//! Budget-constrained selection among fixed priority scenarios.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Priority, ResolvedLocation};
use crate::config::PricingConfig;
use crate::costing::{CostBreakdown, flat_rate_cost, monthly_generator_cost};
use crate::error::{Result, ensure_non_negative};
use crate::load::{ApplianceEntry, WorkingSet, calculate_consumption};
use crate::sizing::{Sizer, size_system_with_efficiency};

/// The three nested appliance subsets considered by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioTier {
    /// High priority only.
    EssentialOnly,
    /// High and Medium.
    EssentialImportant,
    /// High, Medium and Low.
    AllAppliances,
}

impl ScenarioTier {
    /// Tiers from narrowest to broadest.
    pub const ALL: [ScenarioTier; 3] = [
        ScenarioTier::EssentialOnly,
        ScenarioTier::EssentialImportant,
        ScenarioTier::AllAppliances,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::EssentialOnly => "Essential Only (High Priority)",
            Self::EssentialImportant => "Essential + Important (High + Medium)",
            Self::AllAppliances => "All Appliances",
        }
    }

    /// Priorities included in this tier. `Remove` is never included.
    pub fn priorities(self) -> &'static [Priority] {
        match self {
            Self::EssentialOnly => &[Priority::High],
            Self::EssentialImportant => &[Priority::High, Priority::Medium],
            Self::AllAppliances => &[Priority::High, Priority::Medium, Priority::Low],
        }
    }

    /// Whether `entry` belongs to this tier's subset.
    pub fn includes(self, entry: &ApplianceEntry) -> bool {
        entry.quantity > 0
            && entry.priority != Priority::Remove
            && self.priorities().contains(&entry.priority)
    }
}

impl fmt::Display for ScenarioTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sizing and flat-rate cost for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub tier: ScenarioTier,
    /// Number of working-set entries in the subset.
    pub appliance_count: usize,
    pub daily_kwh: f64,
    pub required_kwp: f64,
    pub battery_kwh: f64,
    pub cost: CostBreakdown,
    /// Generator spend avoided each month (naira).
    pub monthly_savings: f64,
    /// `cost.total_cost <= max_budget`.
    pub within_budget: bool,
}

/// All scenario outcomes plus the recommended tier, if any is affordable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub location: ResolvedLocation,
    pub autonomy_days: u32,
    pub max_budget: f64,
    /// One outcome per tier, narrowest first.
    pub outcomes: Vec<ScenarioOutcome>,
    pub recommended: Option<ScenarioTier>,
}

impl OptimizationReport {
    pub fn outcome(&self, tier: ScenarioTier) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.tier == tier)
    }

    pub fn recommended_outcome(&self) -> Option<&ScenarioOutcome> {
        self.recommended.and_then(|tier| self.outcome(tier))
    }
}

/// Sizes and prices every scenario tier and picks the most capable affordable one.
///
/// A tier with no included appliances is reported with zero demand but is
/// never recommended. Among affordable tiers the highest `daily_kwh` wins;
/// ties go to the tier with more appliances, then to the broader tier.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative budget or invalid entries, and
/// `UnknownLocation` when the sizer rejects `location`.
pub fn optimize(
    set: &WorkingSet,
    sizer: &Sizer,
    location: &str,
    autonomy_days: u32,
    max_budget: f64,
    pricing: &PricingConfig,
) -> Result<OptimizationReport> {
    let max_budget = ensure_non_negative("max_budget", max_budget)?;
    let resolved = sizer.resolver.resolve(location)?;

    let mut outcomes = Vec::with_capacity(ScenarioTier::ALL.len());
    for tier in ScenarioTier::ALL {
        let subset: Vec<&ApplianceEntry> = set.iter().filter(|e| tier.includes(e)).collect();
        let profile = calculate_consumption(subset.iter().copied())?;
        let sizing = size_system_with_efficiency(
            profile.total_daily_kwh,
            resolved.irradiance,
            autonomy_days,
            sizer.system_efficiency,
        )?;
        let cost = flat_rate_cost(&sizing, pricing)?;
        outcomes.push(ScenarioOutcome {
            tier,
            appliance_count: subset.len(),
            daily_kwh: profile.total_daily_kwh,
            required_kwp: sizing.required_kwp,
            battery_kwh: sizing.battery_kwh,
            cost,
            monthly_savings: monthly_generator_cost(profile.total_daily_kwh, pricing)?,
            within_budget: cost.total_cost <= max_budget,
        });
    }

    let recommended = outcomes
        .iter()
        .filter(|o| o.within_budget && o.appliance_count > 0)
        .max_by(|a, b| compare_capability(a, b))
        .map(|o| o.tier);
    debug!(?recommended, max_budget, "optimized scenarios");

    Ok(OptimizationReport {
        location: resolved,
        autonomy_days,
        max_budget,
        outcomes,
        recommended,
    })
}

fn compare_capability(a: &ScenarioOutcome, b: &ScenarioOutcome) -> Ordering {
    a.daily_kwh
        .total_cmp(&b.daily_kwh)
        .then(a.appliance_count.cmp(&b.appliance_count))
        .then(a.tier.cmp(&b.tier))
}
