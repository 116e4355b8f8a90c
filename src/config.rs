//! TOML-based site configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{LocationPolicy, LocationResolver, Priority, appliances};
use crate::load::{ApplianceEntry, WorkingSet};
use crate::sizing::{SYSTEM_EFFICIENCY, Sizer};

/// Top-level site configuration parsed from TOML.
///
/// All sections have defaults. Load from TOML with
/// [`SiteConfig::from_toml_file`] or use [`SiteConfig::from_preset`] for a
/// built-in household.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Location, backup days and budget.
    #[serde(default)]
    pub site: SiteSection,
    /// Sizing constants and the unknown-location policy.
    #[serde(default)]
    pub sizing: SizingConfig,
    /// Flat-rate prices used for cost and savings estimates.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Appliances in the working set.
    #[serde(default)]
    pub appliances: Vec<ApplianceConfig>,
}

/// Location, backup days and budget.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// City used for irradiance lookup.
    pub location: String,
    /// Days the battery must carry the full load (must be >= 1).
    pub autonomy_days: u32,
    /// Upper bound on system cost for the optimizer (naira).
    pub max_budget: f64,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            location: "Lagos".to_string(),
            autonomy_days: 2,
            max_budget: 2_000_000.0,
        }
    }
}

/// Sizing constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    /// Inverter and wiring efficiency, in (0.0, 1.0].
    pub system_efficiency: f64,
    /// Irradiance substituted for unknown locations (kWh/m²/day).
    pub fallback_irradiance: f64,
    /// `"fallback"` or `"reject"`.
    pub unknown_location: LocationPolicy,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            system_efficiency: SYSTEM_EFFICIENCY,
            fallback_irradiance: crate::catalog::DEFAULT_IRRADIANCE,
            unknown_location: LocationPolicy::Fallback,
        }
    }
}

impl SizingConfig {
    /// Builds the location-aware sizer for these settings.
    pub fn sizer(&self) -> Sizer {
        Sizer {
            resolver: LocationResolver {
                policy: self.unknown_location,
                fallback_irradiance: self.fallback_irradiance,
            },
            system_efficiency: self.system_efficiency,
        }
    }
}

/// Flat-rate prices (naira).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Panel cost per kWp for optimizer scenarios.
    pub panel_per_kw: f64,
    /// Inverter cost per kWp.
    pub inverter_per_kw: f64,
    /// Battery cost per kWh.
    pub battery_per_kwh: f64,
    /// Installation cost as a fraction of panel cost.
    pub installation_fraction: f64,
    /// Cost of generator power per kWh, the baseline that solar replaces.
    pub generator_cost_per_kwh: f64,
    /// Days in a billing month (must be > 0).
    pub days_per_month: f64,
    /// Rule-of-thumb turnkey budget per kWp.
    pub budget_per_kwp: f64,
    /// Horizon for lifetime savings (months).
    pub horizon_months: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            panel_per_kw: 300_000.0,
            inverter_per_kw: 200_000.0,
            battery_per_kwh: 150_000.0,
            installation_fraction: 0.3,
            generator_cost_per_kwh: 100.0,
            days_per_month: 30.0,
            budget_per_kwp: 1_000_000.0,
            horizon_months: 240,
        }
    }
}

/// One `[[appliances]]` entry.
///
/// Catalog appliances only need `name`; the optional fields override the
/// catalog values. Custom appliances must give `power_watts` and `daily_hours`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceConfig {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub power_watts: Option<f64>,
    #[serde(default)]
    pub daily_hours: Option<f64>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

fn default_quantity() -> u32 {
    1
}

impl ApplianceConfig {
    /// Shorthand for a catalog appliance with the given quantity.
    pub fn catalog(name: &str, quantity: u32) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            power_watts: None,
            daily_hours: None,
            priority: None,
        }
    }

    /// Resolves this entry against the catalog.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming `field` if a custom appliance is
    /// missing power or hours, or if any value is out of range.
    pub fn to_entry(&self, field: &str) -> Result<ApplianceEntry, ConfigError> {
        let spec = appliances::find(&self.name);
        let power = self.power_watts.or(spec.map(|s| s.power_watts));
        let hours = self.daily_hours.or(spec.map(|s| s.daily_hours));
        let priority = self
            .priority
            .or(spec.map(|s| s.priority))
            .unwrap_or(Priority::Medium);

        let (Some(power), Some(hours)) = (power, hours) else {
            return Err(ConfigError {
                field: field.to_string(),
                message: format!(
                    "\"{}\" is not in the appliance catalog; power_watts and daily_hours are required",
                    self.name
                ),
            });
        };

        ApplianceEntry::new(self.name.as_str(), power, hours, self.quantity, priority).map_err(|e| {
            ConfigError {
                field: field.to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"site.autonomy_days"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl SiteConfig {
    /// A one-bedroom flat: lights, fans, fridge, TV and a laptop.
    pub fn apartment() -> Self {
        Self {
            site: SiteSection {
                max_budget: 1_500_000.0,
                ..SiteSection::default()
            },
            appliances: vec![
                ApplianceConfig::catalog("Refrigerator (Energy Efficient)", 1),
                ApplianceConfig::catalog("LED Bulb (12W)", 6),
                ApplianceConfig::catalog("Ceiling Fan", 2),
                ApplianceConfig::catalog("LED TV (32 inch)", 1),
                ApplianceConfig::catalog("Laptop", 1),
                ApplianceConfig::catalog("Phone Charger", 2),
                ApplianceConfig::catalog("Router/WiFi", 1),
            ],
            ..Self::default()
        }
    }

    /// A family house in Abuja with air conditioning and a water pump.
    pub fn family_home() -> Self {
        Self {
            site: SiteSection {
                location: "Abuja".to_string(),
                autonomy_days: 2,
                max_budget: 6_000_000.0,
            },
            appliances: vec![
                ApplianceConfig::catalog("Refrigerator (Standard)", 1),
                ApplianceConfig::catalog("Air Conditioner (1HP)", 1),
                ApplianceConfig::catalog("Air Conditioner (2HP)", 1),
                ApplianceConfig::catalog("LED TV (55 inch)", 1),
                ApplianceConfig::catalog("Ceiling Fan", 4),
                ApplianceConfig::catalog("LED Bulb (12W)", 12),
                ApplianceConfig::catalog("Washing Machine", 1),
                ApplianceConfig::catalog("Microwave", 1),
                ApplianceConfig::catalog("Iron", 1),
                ApplianceConfig::catalog("Water Pump", 1),
                ApplianceConfig::catalog("Security System", 1),
                ApplianceConfig::catalog("Router/WiFi", 1),
            ],
            ..Self::default()
        }
    }

    /// A small office in Kano running desktops through the day.
    pub fn small_office() -> Self {
        Self {
            site: SiteSection {
                location: "Kano".to_string(),
                autonomy_days: 1,
                max_budget: 4_000_000.0,
            },
            appliances: vec![
                ApplianceConfig::catalog("Desktop Computer", 4),
                ApplianceConfig::catalog("Laptop", 2),
                ApplianceConfig::catalog("Fluorescent Tube", 8),
                ApplianceConfig::catalog("Air Conditioner (1.5HP)", 1),
                ApplianceConfig::catalog("Ceiling Fan", 3),
                ApplianceConfig::catalog("Router/WiFi", 1),
                ApplianceConfig {
                    name: "Laser Printer".to_string(),
                    quantity: 1,
                    power_watts: Some(400.0),
                    daily_hours: Some(1.5),
                    priority: Some(Priority::Medium),
                },
            ],
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["apartment", "family_home", "small_office"];

    /// Loads a site from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "apartment" => Ok(Self::apartment()),
            "family_home" => Ok(Self::family_home()),
            "small_office" => Ok(Self::small_office()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a site from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "site".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a site from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Builds the working set described by `[[appliances]]`.
    ///
    /// # Errors
    ///
    /// Returns the first invalid or duplicate entry.
    pub fn working_set(&self) -> Result<WorkingSet, ConfigError> {
        let mut set = WorkingSet::new();
        for (i, a) in self.appliances.iter().enumerate() {
            let field = format!("appliances[{i}]");
            let entry = a.to_entry(&field)?;
            set.add_custom(entry).map_err(|e| ConfigError {
                field,
                message: e.to_string(),
            })?;
        }
        Ok(set)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let site = &self.site;

        if site.location.trim().is_empty() {
            errors.push(ConfigError {
                field: "site.location".into(),
                message: "must not be empty".into(),
            });
        }
        if site.autonomy_days == 0 {
            errors.push(ConfigError {
                field: "site.autonomy_days".into(),
                message: "must be >= 1".into(),
            });
        }
        if !site.max_budget.is_finite() || site.max_budget < 0.0 {
            errors.push(ConfigError {
                field: "site.max_budget".into(),
                message: "must be a finite number >= 0".into(),
            });
        }

        let sz = &self.sizing;
        if !(sz.system_efficiency > 0.0 && sz.system_efficiency <= 1.0) {
            errors.push(ConfigError {
                field: "sizing.system_efficiency".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !sz.fallback_irradiance.is_finite() || sz.fallback_irradiance <= 0.0 {
            errors.push(ConfigError {
                field: "sizing.fallback_irradiance".into(),
                message: "must be > 0".into(),
            });
        }

        let p = &self.pricing;
        for (field, value) in [
            ("pricing.panel_per_kw", p.panel_per_kw),
            ("pricing.inverter_per_kw", p.inverter_per_kw),
            ("pricing.battery_per_kwh", p.battery_per_kwh),
            ("pricing.installation_fraction", p.installation_fraction),
            ("pricing.generator_cost_per_kwh", p.generator_cost_per_kwh),
            ("pricing.budget_per_kwp", p.budget_per_kwp),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be a finite number >= 0".into(),
                });
            }
        }
        if !p.days_per_month.is_finite() || p.days_per_month <= 0.0 {
            errors.push(ConfigError {
                field: "pricing.days_per_month".into(),
                message: "must be > 0".into(),
            });
        }

        let mut seen: Vec<&str> = Vec::new();
        for (i, a) in self.appliances.iter().enumerate() {
            let field = format!("appliances[{i}]");
            if let Err(e) = a.to_entry(&field) {
                errors.push(e);
            }
            let name = a.name.trim();
            if seen.contains(&name) {
                errors.push(ConfigError {
                    field: format!("{field}.name"),
                    message: format!("duplicate appliance \"{name}\""),
                });
            } else {
                seen.push(name);
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let cfg = SiteConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
        assert_eq!(cfg.site.location, "Lagos");
        assert_eq!(cfg.site.autonomy_days, 2);
    }

    #[test]
    fn from_preset_unknown() {
        let err = SiteConfig::from_preset("mansion");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in SiteConfig::PRESETS {
            let cfg = SiteConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
            let set = cfg.as_ref().map(|c| c.working_set());
            assert!(matches!(set, Ok(Ok(ref s)) if !s.is_empty()));
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[site]
location = "Jos"
autonomy_days = 3
max_budget = 3500000

[sizing]
system_efficiency = 0.8
fallback_irradiance = 4.9
unknown_location = "reject"

[pricing]
panel_per_kw = 280000
inverter_per_kw = 210000
battery_per_kwh = 140000
installation_fraction = 0.25
generator_cost_per_kwh = 120
days_per_month = 30
budget_per_kwp = 950000
horizon_months = 180

[[appliances]]
name = "Ceiling Fan"
quantity = 3

[[appliances]]
name = "Borehole Pump"
power_watts = 1100
daily_hours = 1.5
priority = "High"
"#;
        let cfg = SiteConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.site.autonomy_days), Some(3));
        assert_eq!(
            cfg.as_ref().map(|c| c.sizing.unknown_location),
            Some(LocationPolicy::Reject)
        );
        let set = cfg.as_ref().map(|c| c.working_set());
        let Some(Ok(set)) = set else {
            panic!("working set should build");
        };
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("Ceiling Fan").map(|e| e.quantity), Some(3));
        assert_eq!(
            set.get("Borehole Pump").map(|e| e.priority),
            Some(Priority::High)
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[site]
location = "Lagos"
bogus_field = true
"#;
        assert!(SiteConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[site]
location = "Kaduna"
"#;
        let cfg = SiteConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.site.autonomy_days), Some(2));
        assert_eq!(cfg.as_ref().map(|c| c.pricing.panel_per_kw), Some(300_000.0));
        assert_eq!(cfg.as_ref().map(|c| c.appliances.len()), Some(0));
    }

    #[test]
    fn validation_catches_zero_autonomy() {
        let mut cfg = SiteConfig::default();
        cfg.site.autonomy_days = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "site.autonomy_days"));
    }

    #[test]
    fn validation_catches_bad_efficiency_and_prices() {
        let mut cfg = SiteConfig::default();
        cfg.sizing.system_efficiency = 0.0;
        cfg.pricing.battery_per_kwh = -1.0;
        cfg.pricing.days_per_month = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "sizing.system_efficiency"));
        assert!(errors.iter().any(|e| e.field == "pricing.battery_per_kwh"));
        assert!(errors.iter().any(|e| e.field == "pricing.days_per_month"));
    }

    #[test]
    fn validation_catches_custom_without_power() {
        let mut cfg = SiteConfig::default();
        cfg.appliances.push(ApplianceConfig::catalog("Mystery Box", 1));
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "appliances[0]"));
    }

    #[test]
    fn validation_catches_duplicates() {
        let mut cfg = SiteConfig::default();
        cfg.appliances.push(ApplianceConfig::catalog("Laptop", 1));
        cfg.appliances.push(ApplianceConfig::catalog("Laptop", 2));
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "appliances[1].name"));
        assert!(cfg.working_set().is_err());
    }

    #[test]
    fn overrides_replace_catalog_values() {
        let a = ApplianceConfig {
            name: "Laptop".to_string(),
            quantity: 2,
            power_watts: None,
            daily_hours: Some(10.0),
            priority: Some(Priority::Low),
        };
        let e = a.to_entry("appliances[0]").unwrap();
        assert_eq!(e.power_watts, 65.0);
        assert_eq!(e.daily_hours, 10.0);
        assert_eq!(e.priority, Priority::Low);
    }
}
