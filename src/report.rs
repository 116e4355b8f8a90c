//! Plain-text rendering of estimates for the terminal.
//!
//! Currency formatting lives here and nowhere in the calculators.

use std::fmt;

use crate::catalog::Vendor;
use crate::catalog::vendors::vendor_cities;
use crate::estimate::SystemEstimate;
use crate::optimizer::OptimizationReport;

/// Formats an amount as whole naira with thousands separators, e.g. `₦1,250,000`.
pub fn format_naira(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}₦{grouped}")
}

/// Load, sizing, panel and cost sections for a [`SystemEstimate`].
pub struct EstimateReport<'a>(pub &'a SystemEstimate);

impl fmt::Display for EstimateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.0;

        writeln!(f, "--- Load Summary ---")?;
        for line in &e.breakdown {
            writeln!(
                f,
                "{:<34} x{:<3} {:>6.0} W  {:>5.2} h/day  {:>6.2} kWh  [{}]",
                line.name, line.quantity, line.power_watts, line.daily_hours, line.daily_kwh, line.priority,
            )?;
        }
        writeln!(f, "Total power:           {:.0} W", e.load.total_watts)?;
        writeln!(f, "Daily energy:          {:.2} kWh", e.load.total_daily_kwh)?;
        writeln!(f, "Monthly energy:        {:.1} kWh", e.monthly_kwh)?;
        writeln!(f, "Monthly gen. cost:     {}", format_naira(e.monthly_generator_cost))?;

        writeln!(f, "\n--- Solar Sizing ---")?;
        let fallback = if e.location.is_fallback { " (fallback)" } else { "" };
        writeln!(f, "Location:              {}{fallback}", e.location.name)?;
        writeln!(f, "Solar irradiance:      {} kWh/m²/day", e.sizing.irradiance_used)?;
        writeln!(f, "Required capacity:     {:.2} kWp", e.sizing.required_kwp)?;
        writeln!(
            f,
            "Battery capacity:      {:.1} kWh ({} day backup)",
            e.sizing.battery_kwh, e.autonomy_days
        )?;

        writeln!(f, "\n--- Panel Recommendations ---")?;
        for r in &e.panels {
            writeln!(
                f,
                "{:<22} {:>3} panels  {:>6.2} kW  {:>14}  {:>7.2}/W  {:>3}%  {:>2} yr",
                r.panel.name,
                r.panel_count,
                r.total_capacity_kw,
                format_naira(r.total_cost),
                r.cost_per_watt,
                r.panel.efficiency_pct,
                r.panel.warranty_years,
            )?;
        }

        writeln!(f, "\n--- System Estimate ---")?;
        if let Some(best) = &e.best_panel {
            writeln!(
                f,
                "Recommended:           {} x {} ({:.2} kW)",
                best.panel_count, best.panel.name, best.total_capacity_kw
            )?;
        }
        writeln!(f, "Panels:                {}", format_naira(e.cost.panel_cost))?;
        writeln!(f, "Inverter:              {}", format_naira(e.cost.inverter_cost))?;
        writeln!(f, "Batteries:             {}", format_naira(e.cost.battery_cost))?;
        writeln!(f, "Installation:          {}", format_naira(e.cost.installation_cost))?;
        writeln!(f, "Total:                 {}", format_naira(e.cost.total_cost))?;
        writeln!(f, "Quick budget:          {}", format_naira(e.quick_budget))?;

        writeln!(f, "\n--- Return on Investment ---")?;
        writeln!(f, "Monthly savings:       {}", format_naira(e.roi.monthly_savings))?;
        match e.roi.payback_months {
            Some(months) => writeln!(f, "Payback period:        {months:.1} months")?,
            None => writeln!(f, "Payback period:        n/a")?,
        }
        write!(
            f,
            "{}-month savings:      {}",
            e.roi.horizon_months,
            format_naira(e.roi.lifetime_savings)
        )
    }
}

/// Scenario table and recommendation for an [`OptimizationReport`].
pub struct OptimizationView<'a>(pub &'a OptimizationReport);

impl fmt::Display for OptimizationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(
            f,
            "--- Load Optimization (budget {}, {}) ---",
            format_naira(r.max_budget),
            r.location.name
        )?;
        for o in &r.outcomes {
            writeln!(
                f,
                "{:<40} {:>7.2} kWh  {:>6.2} kWp  {:>14}  {}",
                o.tier.label(),
                o.daily_kwh,
                o.required_kwp,
                format_naira(o.cost.total_cost),
                if o.within_budget { "within budget" } else { "over budget" },
            )?;
        }
        match r.recommended_outcome() {
            Some(best) => write!(
                f,
                "Recommended: {} ({:.2} kWh/day, {}, saves {}/month)",
                best.tier.label(),
                best.daily_kwh,
                format_naira(best.cost.total_cost),
                format_naira(best.monthly_savings)
            ),
            None => write!(f, "Recommended: none within budget"),
        }
    }
}

/// Vendor listing for one city.
pub struct VendorList<'a> {
    pub city: &'a str,
    pub vendors: &'a [&'static Vendor],
}

impl fmt::Display for VendorList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Solar Vendors in {} ---", self.city)?;
        if self.vendors.is_empty() {
            return write!(
                f,
                "No vendors listed. Vendors are listed for: {}",
                vendor_cities().join(", ")
            );
        }
        for (i, v) in self.vendors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<22} {:.1}/5  {:<20} {}",
                v.name,
                v.rating,
                v.specialty.label(),
                v.phone
            )?;
        }
        Ok(())
    }
}
