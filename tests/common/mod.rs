//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_size::catalog::{LocationPolicy, LocationResolver};
use solar_size::config::PricingConfig;
use solar_size::load::{ApplianceEntry, WorkingSet};
use solar_size::sizing::Sizer;

/// Absolute tolerance for float comparisons.
pub const EPS: f64 = 1e-9;

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS * a.abs().max(b.abs()).max(1.0)
}

/// Working set built from catalog names with the given quantities.
pub fn catalog_set(items: &[(&str, u32)]) -> WorkingSet {
    let mut set = WorkingSet::new();
    for &(name, quantity) in items {
        set.add_from_catalog(name).expect("catalog appliance");
        set.set_quantity(name, quantity).expect("entry just added");
    }
    set
}

/// Three appliances, one per priority tier (3.6 / 5.968 / 1.2 kWh a day).
pub fn tiered_set() -> WorkingSet {
    catalog_set(&[
        ("Refrigerator (Energy Efficient)", 1),
        ("Air Conditioner (1HP)", 1),
        ("Iron", 1),
    ])
}

/// A custom appliance that is not in the catalog.
pub fn custom_entry(name: &str, watts: f64, hours: f64) -> ApplianceEntry {
    ApplianceEntry::new(name, watts, hours, 1, solar_size::catalog::Priority::Medium)
        .expect("valid custom entry")
}

/// Default sizer: 85% efficiency, fallback to 5.0 for unknown cities.
pub fn default_sizer() -> Sizer {
    Sizer::default()
}

/// Sizer that fails on unknown cities.
pub fn strict_sizer() -> Sizer {
    Sizer {
        resolver: LocationResolver {
            policy: LocationPolicy::Reject,
            ..LocationResolver::default()
        },
        ..Sizer::default()
    }
}

pub fn default_pricing() -> PricingConfig {
    PricingConfig::default()
}
