//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use super::runtime::App;
use super::style;
use crate::report::format_naira;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // appliances + summary
            Constraint::Length(6), // scenarios
            Constraint::Length(3), // budget gauge
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    render_appliances(frame, app, body[0]);
    render_summary(frame, app, body[1]);

    render_scenarios(frame, app, chunks[2]);
    render_budget_gauge(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Header bar: location, irradiance, backup days, budget.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let irradiance = app.estimate.as_ref().map_or_else(
        || "-".to_string(),
        |e| {
            let marker = if e.location.is_fallback { " (fallback)" } else { "" };
            format!("{} kWh/m²/day{marker}", e.sizing.irradiance_used)
        },
    );

    let header = Line::from(vec![
        Span::styled(
            " SOLAR-SIZE ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            app.estimator.location.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ {irradiance} │ {} day backup │ budget {} ",
            app.estimator.autonomy_days,
            format_naira(app.estimator.max_budget),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Working-set rows with the selection highlighted.
fn render_appliances(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = if app.set.is_empty() {
        vec![Line::from("  No appliances. Press n/a to add from the catalog.")]
    } else {
        app.set
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let row_style = if i == app.selected {
                    Style::default().bg(style::SELECTED_BG)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::raw(format!(
                        " {:<32} x{:<3} {:>6.0} W {:>5.1} h {:>6.2} kWh ",
                        e.name,
                        e.quantity,
                        e.power_watts,
                        e.daily_hours,
                        e.daily_kwh(),
                    )),
                    Span::styled(
                        e.priority.label(),
                        Style::default().fg(style::priority_color(e.priority)),
                    ),
                ])
                .style(row_style)
            })
            .collect()
    };

    let block = Block::default().title(" Appliances ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Load, sizing and cost summary for the whole set.
fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if let Some(e) = &app.estimate {
        let mut lines = vec![
            Line::from(format!("  Power       {:.0} W", e.load.total_watts)),
            Line::from(format!("  Daily       {:.2} kWh", e.load.total_daily_kwh)),
            Line::from(format!("  Monthly     {:.1} kWh", e.monthly_kwh)),
            Line::from(format!("  Array       {:.2} kWp", e.sizing.required_kwp)),
            Line::from(format!("  Battery     {:.1} kWh", e.sizing.battery_kwh)),
        ];
        if let Some(best) = &e.best_panel {
            lines.push(Line::from(format!(
                "  Panels      {} x {}",
                best.panel_count, best.panel.name
            )));
        }
        lines.push(Line::from(format!("  Total       {}", format_naira(e.cost.total_cost))));
        lines.push(Line::from(match e.roi.payback_months {
            Some(m) => format!("  Payback     {m:.1} months"),
            None => "  Payback     n/a".to_string(),
        }));
        lines
    } else {
        vec![Line::from("  No estimate for the current inputs.")]
    };

    let block = Block::default().title(" Estimate ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One line per optimizer scenario, recommended tier marked.
fn render_scenarios(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match &app.report {
        Some(report) => report
            .outcomes
            .iter()
            .map(|o| {
                let recommended = report.recommended == Some(o.tier);
                let (marker, color) = if recommended {
                    ("*", style::RECOMMENDED)
                } else if o.within_budget {
                    (" ", style::HEADER_FG)
                } else {
                    (" ", style::OVER_BUDGET)
                };
                Line::from(Span::styled(
                    format!(
                        " {marker} {:<40} {:>7.2} kWh  {:>14}",
                        o.tier.label(),
                        o.daily_kwh,
                        format_naira(o.cost.total_cost),
                    ),
                    Style::default().fg(color),
                ))
            })
            .collect(),
        None => vec![Line::from("  Scenario comparison unavailable.")],
    };

    let block = Block::default().title(" Scenarios ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Recommended scenario cost against the budget.
fn render_budget_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let ratio = app.budget_ratio();
    let gauge = Gauge::default()
        .block(Block::default().title(" Budget ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::budget_color(ratio)))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, area);
}

/// Footer with the status message or keybinding hints.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.status.is_empty() {
        Line::from(Span::styled(
            format!(
                " q:Quit  ↑/↓:Select  +/-:Qty  [/]:Hours  p:Priority  d:Delete  n:Next({})  a:Add  c:City  ←/→:Days",
                app.catalog_candidate()
            ),
            Style::default().fg(style::FOOTER_FG),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {}", app.status),
            Style::default().fg(style::STATUS_FG),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
