//! System cost, savings and payback estimates.
//!
//! Two cost models exist. [`flat_rate_cost`] prices panels at a flat rate
//! per kWp and is what the scenario optimizer uses. [`catalog_cost`] takes
//! the panel cost from a concrete [`PanelRecommendation`].

use serde::Serialize;

use crate::config::PricingConfig;
use crate::error::{Result, ensure_finite, ensure_non_negative, ensure_positive};
use crate::recommend::PanelRecommendation;
use crate::sizing::SizingResult;

/// Itemised system cost (naira).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub panel_cost: f64,
    pub inverter_cost: f64,
    pub battery_cost: f64,
    pub installation_cost: f64,
    pub total_cost: f64,
}

impl CostBreakdown {
    fn from_panel_cost(panel_cost: f64, sizing: &SizingResult, pricing: &PricingConfig) -> Result<Self> {
        let inverter_per_kw = ensure_non_negative("pricing.inverter_per_kw", pricing.inverter_per_kw)?;
        let battery_per_kwh = ensure_non_negative("pricing.battery_per_kwh", pricing.battery_per_kwh)?;
        let installation_fraction =
            ensure_non_negative("pricing.installation_fraction", pricing.installation_fraction)?;

        let inverter_cost = sizing.required_kwp * inverter_per_kw;
        let battery_cost = sizing.battery_kwh * battery_per_kwh;
        let installation_cost = panel_cost * installation_fraction;
        Ok(Self {
            panel_cost,
            inverter_cost,
            battery_cost,
            installation_cost,
            total_cost: ensure_finite(
                "total_cost",
                panel_cost + inverter_cost + battery_cost + installation_cost,
            )?,
        })
    }
}

/// Cost with panels priced at `pricing.panel_per_kw` per kWp.
///
/// # Errors
///
/// Returns `InvalidInput` for negative or non-finite prices.
pub fn flat_rate_cost(sizing: &SizingResult, pricing: &PricingConfig) -> Result<CostBreakdown> {
    let panel_per_kw = ensure_non_negative("pricing.panel_per_kw", pricing.panel_per_kw)?;
    CostBreakdown::from_panel_cost(sizing.required_kwp * panel_per_kw, sizing, pricing)
}

/// Cost with panels priced from a catalog recommendation.
pub fn catalog_cost(
    panels: &PanelRecommendation,
    sizing: &SizingResult,
    pricing: &PricingConfig,
) -> Result<CostBreakdown> {
    CostBreakdown::from_panel_cost(panels.total_cost, sizing, pricing)
}

/// Monthly cost of running the same load on generator power (naira).
pub fn monthly_generator_cost(daily_kwh: f64, pricing: &PricingConfig) -> Result<f64> {
    let daily_kwh = ensure_non_negative("daily_kwh", daily_kwh)?;
    let days = ensure_positive("pricing.days_per_month", pricing.days_per_month)?;
    let rate = ensure_non_negative("pricing.generator_cost_per_kwh", pricing.generator_cost_per_kwh)?;
    ensure_finite("monthly_generator_cost", daily_kwh * days * rate)
}

/// Rule-of-thumb turnkey budget for an array of `required_kwp`.
pub fn quick_budget(required_kwp: f64, pricing: &PricingConfig) -> Result<f64> {
    let kwp = ensure_non_negative("required_kwp", required_kwp)?;
    let rate = ensure_non_negative("pricing.budget_per_kwp", pricing.budget_per_kwp)?;
    ensure_finite("quick_budget", kwp * rate)
}

/// Savings from replacing generator power with the solar system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnOnInvestment {
    /// Generator spend avoided each month (naira).
    pub monthly_savings: f64,
    /// Months until savings repay the system; `None` when nothing is saved.
    pub payback_months: Option<f64>,
    /// Savings over `horizon_months` minus the system cost (naira).
    pub lifetime_savings: f64,
    pub horizon_months: u32,
}

/// Payback and lifetime savings for a system costing `total_cost`.
///
/// # Errors
///
/// Returns `InvalidInput` for negative demand or cost.
pub fn return_on_investment(
    daily_kwh: f64,
    total_cost: f64,
    pricing: &PricingConfig,
) -> Result<ReturnOnInvestment> {
    let total_cost = ensure_non_negative("total_cost", total_cost)?;
    let monthly_savings = monthly_generator_cost(daily_kwh, pricing)?;
    let payback_months = if monthly_savings > 0.0 {
        Some(ensure_finite("payback_months", total_cost / monthly_savings)?)
    } else {
        None
    };
    Ok(ReturnOnInvestment {
        monthly_savings,
        payback_months,
        lifetime_savings: ensure_finite(
            "lifetime_savings",
            monthly_savings * f64::from(pricing.horizon_months) - total_cost,
        )?,
        horizon_months: pricing.horizon_months,
    })
}
