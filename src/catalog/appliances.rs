use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SizingError;

/// Importance tier of an appliance, used to build the optimizer scenarios.
///
/// `Remove` keeps the appliance in the working set but excludes it from
/// every optimization scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
    Remove,
}

impl Priority {
    /// All tiers in display order.
    pub const ALL: [Priority; 4] = [
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Remove,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Remove => "Remove",
        }
    }

    /// Cycles to the next tier, wrapping after `Remove`.
    pub fn next(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::Remove,
            Self::Remove => Self::High,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                SizingError::invalid(
                    "priority",
                    format!("unknown priority \"{wanted}\", expected High, Medium, Low or Remove"),
                )
            })
    }
}

/// Catalog entry with typical consumption figures for a household appliance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApplianceSpec {
    pub name: &'static str,
    /// Rated power draw (W).
    pub power_watts: f64,
    /// Typical daily usage (hours).
    pub daily_hours: f64,
    pub priority: Priority,
}

const fn spec(name: &'static str, power_watts: f64, daily_hours: f64, priority: Priority) -> ApplianceSpec {
    ApplianceSpec {
        name,
        power_watts,
        daily_hours,
        priority,
    }
}

/// Common household appliances.
pub const APPLIANCES: &[ApplianceSpec] = &[
    spec("Refrigerator (Energy Efficient)", 150.0, 24.0, Priority::High),
    spec("Refrigerator (Standard)", 300.0, 24.0, Priority::High),
    spec("Air Conditioner (1HP)", 746.0, 8.0, Priority::Medium),
    spec("Air Conditioner (1.5HP)", 1119.0, 8.0, Priority::Medium),
    spec("Air Conditioner (2HP)", 1492.0, 8.0, Priority::Low),
    spec("LED TV (32 inch)", 60.0, 6.0, Priority::Medium),
    spec("LED TV (55 inch)", 120.0, 6.0, Priority::Medium),
    spec("Ceiling Fan", 75.0, 12.0, Priority::High),
    spec("LED Bulb (12W)", 12.0, 8.0, Priority::High),
    spec("Fluorescent Tube", 40.0, 8.0, Priority::Medium),
    spec("Laptop", 65.0, 8.0, Priority::High),
    spec("Desktop Computer", 200.0, 8.0, Priority::Medium),
    spec("Washing Machine", 500.0, 1.0, Priority::Medium),
    spec("Microwave", 1000.0, 0.5, Priority::Low),
    spec("Electric Kettle", 1500.0, 0.25, Priority::Low),
    spec("Iron", 1200.0, 1.0, Priority::Low),
    spec("Water Pump", 750.0, 2.0, Priority::High),
    spec("Security System", 50.0, 24.0, Priority::High),
    spec("Phone Charger", 10.0, 3.0, Priority::High),
    spec("Router/WiFi", 20.0, 24.0, Priority::High),
];

/// Looks up a catalog appliance by exact name.
pub fn find(name: &str) -> Option<&'static ApplianceSpec> {
    APPLIANCES.iter().find(|a| a.name == name)
}
