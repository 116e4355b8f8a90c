//! CSV export for panel recommendations and optimizer scenarios.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::optimizer::ScenarioOutcome;
use crate::recommend::PanelRecommendation;

/// Column header for panel recommendation export.
const PANELS_HEADER: &str = "panel_type,panel_count,total_capacity_kw,total_cost,\
                             cost_per_watt,efficiency_pct,warranty_years";

/// Column header for scenario export.
const SCENARIOS_HEADER: &str = "scenario,appliance_count,daily_kwh,required_kwp,battery_kwh,\
                                panel_cost,inverter_cost,battery_cost,installation_cost,\
                                total_cost,monthly_savings,within_budget";

/// Exports panel recommendations to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_panels_csv(rows: &[PanelRecommendation], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_panels_csv(rows, io::BufWriter::new(file))
}

/// Writes panel recommendations as CSV to any writer.
///
/// Amounts are raw numbers; currency formatting is left to the reader.
pub fn write_panels_csv(rows: &[PanelRecommendation], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(PANELS_HEADER.split(',').map(str::trim))?;

    for r in rows {
        wtr.write_record(&[
            r.panel.name.to_string(),
            r.panel_count.to_string(),
            format!("{:.2}", r.total_capacity_kw),
            format!("{:.0}", r.total_cost),
            format!("{:.2}", r.cost_per_watt),
            format!("{}", r.panel.efficiency_pct),
            r.panel.warranty_years.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports scenario outcomes to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_scenarios_csv(outcomes: &[ScenarioOutcome], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_scenarios_csv(outcomes, io::BufWriter::new(file))
}

/// Writes scenario outcomes as CSV to any writer.
pub fn write_scenarios_csv(outcomes: &[ScenarioOutcome], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SCENARIOS_HEADER.split(',').map(str::trim))?;

    for o in outcomes {
        wtr.write_record(&[
            o.tier.label().to_string(),
            o.appliance_count.to_string(),
            format!("{:.4}", o.daily_kwh),
            format!("{:.4}", o.required_kwp),
            format!("{:.4}", o.battery_kwh),
            format!("{:.0}", o.cost.panel_cost),
            format!("{:.0}", o.cost.inverter_cost),
            format!("{:.0}", o.cost.battery_cost),
            format!("{:.0}", o.cost.installation_cost),
            format!("{:.0}", o.cost.total_cost),
            format!("{:.0}", o.monthly_savings),
            o.within_budget.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PANELS;
    use crate::config::PricingConfig;
    use crate::load::WorkingSet;
    use crate::optimizer::optimize;
    use crate::recommend::recommend_panels;
    use crate::sizing::Sizer;

    #[test]
    fn panels_header_and_row_count() {
        let rows = recommend_panels(2.0, PANELS).unwrap();
        let mut buf = Vec::new();
        write_panels_csv(&rows, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        assert_eq!(
            lines[0],
            "panel_type,panel_count,total_capacity_kw,total_cost,cost_per_watt,efficiency_pct,warranty_years"
        );
        // 1 header + one row per catalog panel
        assert_eq!(lines.len(), PANELS.len() + 1);
    }

    #[test]
    fn panels_round_trip_parseable() {
        let rows = recommend_panels(3.3, PANELS).unwrap();
        let mut buf = Vec::new();
        write_panels_csv(&rows, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(7));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref().unwrap();
            assert!(rec[1].parse::<u64>().is_ok(), "panel_count should be an integer");
            for i in 2..5 {
                assert!(rec[i].parse::<f64>().is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, PANELS.len());
    }

    #[test]
    fn scenarios_export_one_row_per_tier() {
        let mut set = WorkingSet::new();
        set.add_from_catalog("Laptop").unwrap();
        let report = optimize(
            &set,
            &Sizer::default(),
            "Lagos",
            2,
            1_000_000.0,
            &PricingConfig::default(),
        )
        .unwrap();
        let mut buf = Vec::new();
        write_scenarios_csv(&report.outcomes, &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("scenario,appliance_count,daily_kwh"));
        assert!(lines[3].starts_with("All Appliances,1,"));
    }

    #[test]
    fn deterministic_output() {
        let rows = recommend_panels(4.2, PANELS).unwrap();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_panels_csv(&rows, &mut buf1).ok();
        write_panels_csv(&rows, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }
}
