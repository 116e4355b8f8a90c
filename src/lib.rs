//! Residential solar sizing for Nigerian households.
//!
//! Sums appliance loads, sizes the array and battery bank for a city's
//! irradiance, prices catalog panel configurations, and picks the most
//! capable priority scenario that fits a budget.

#[cfg(feature = "api")]
pub mod api;
pub mod catalog;
pub mod config;
pub mod costing;
pub mod error;
pub mod estimate;
pub mod io;
/// Appliance working set and consumption calculator.
pub mod load;
pub mod optimizer;
pub mod recommend;
/// Terminal rendering of estimates and scenario tables.
pub mod report;
pub mod sizing;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::{Result, SizingError};
