//! Color constants for the TUI.

use ratatui::style::Color;

use crate::catalog::Priority;

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Highlighted working-set row.
pub const SELECTED_BG: Color = Color::Blue;
/// Recommended scenario marker.
pub const RECOMMENDED: Color = Color::Green;
/// Scenario that exceeds the budget.
pub const OVER_BUDGET: Color = Color::Red;
/// Status message color.
pub const STATUS_FG: Color = Color::Yellow;

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Cyan,
        Priority::Remove => Color::DarkGray,
    }
}

/// Budget gauge color: green under 75%, yellow under 100%, red when full.
pub fn budget_color(ratio: f64) -> Color {
    if ratio < 0.75 {
        Color::Green
    } else if ratio < 1.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}
