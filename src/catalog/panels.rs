use serde::Serialize;

/// A commercially available solar panel model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelSpec {
    pub name: &'static str,
    /// Rated output under standard test conditions (W).
    pub watt_rating: f64,
    /// Price per panel (naira).
    pub unit_price: f64,
    /// Module efficiency as a raw percentage (e.g., 20 for 20%).
    pub efficiency_pct: f64,
    pub warranty_years: u32,
}

/// Panel models stocked by Nigerian suppliers.
pub const PANELS: &[PanelSpec] = &[
    PanelSpec {
        name: "Monocrystalline 300W",
        watt_rating: 300.0,
        unit_price: 85_000.0,
        efficiency_pct: 20.0,
        warranty_years: 25,
    },
    PanelSpec {
        name: "Monocrystalline 400W",
        watt_rating: 400.0,
        unit_price: 110_000.0,
        efficiency_pct: 21.0,
        warranty_years: 25,
    },
    PanelSpec {
        name: "Monocrystalline 500W",
        watt_rating: 500.0,
        unit_price: 135_000.0,
        efficiency_pct: 22.0,
        warranty_years: 25,
    },
    PanelSpec {
        name: "Polycrystalline 300W",
        watt_rating: 300.0,
        unit_price: 75_000.0,
        efficiency_pct: 17.0,
        warranty_years: 20,
    },
    PanelSpec {
        name: "Polycrystalline 400W",
        watt_rating: 400.0,
        unit_price: 95_000.0,
        efficiency_pct: 18.0,
        warranty_years: 20,
    },
];
