//! Appliance working set and the consumption calculator.

use serde::Serialize;
use tracing::debug;

use crate::catalog::Priority;
use crate::catalog::appliances;
use crate::error::{Result, SizingError, ensure_finite, ensure_non_negative, ensure_positive};

/// One appliance selected by the user, with its usage pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplianceEntry {
    /// Identity key within a [`WorkingSet`].
    pub name: String,
    /// Power draw of a single unit (W, > 0).
    pub power_watts: f64,
    /// Daily usage (hours, >= 0).
    pub daily_hours: f64,
    /// Number of units; zero keeps the entry but removes its load.
    pub quantity: u32,
    pub priority: Priority,
}

impl ApplianceEntry {
    /// Creates a validated entry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name, non-positive power or
    /// negative hours.
    pub fn new(
        name: impl Into<String>,
        power_watts: f64,
        daily_hours: f64,
        quantity: u32,
        priority: Priority,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SizingError::invalid("name", "must not be empty"));
        }
        let entry = Self {
            name: name.trim().to_string(),
            power_watts,
            daily_hours,
            quantity,
            priority,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Builds a single-unit entry from a catalog appliance.
    pub fn from_catalog(spec: &appliances::ApplianceSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            power_watts: spec.power_watts,
            daily_hours: spec.daily_hours,
            quantity: 1,
            priority: spec.priority,
        }
    }

    /// Checks the numeric invariants of this entry.
    pub fn validate(&self) -> Result<()> {
        ensure_positive(&format!("{}.power_watts", self.name), self.power_watts)?;
        ensure_non_negative(&format!("{}.daily_hours", self.name), self.daily_hours)?;
        Ok(())
    }

    /// Combined draw of all units (W).
    pub fn total_watts(&self) -> f64 {
        self.power_watts * f64::from(self.quantity)
    }

    /// Daily energy use of all units (kWh).
    pub fn daily_kwh(&self) -> f64 {
        self.total_watts() * self.daily_hours / 1000.0
    }
}

/// Aggregate load of a set of appliances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LoadProfile {
    /// Sum of connected power (W).
    pub total_watts: f64,
    /// Daily energy demand (kWh).
    pub total_daily_kwh: f64,
}

impl LoadProfile {
    /// Energy demand over a billing month of `days_per_month` days (kWh).
    pub fn monthly_kwh(&self, days_per_month: f64) -> f64 {
        self.total_daily_kwh * days_per_month
    }
}

/// Sums power and daily energy over entries with a non-zero quantity.
///
/// An empty input yields a zero profile.
///
/// # Errors
///
/// Returns `InvalidInput` if any entry has non-positive power or negative
/// hours, including entries whose quantity is zero.
pub fn calculate_consumption<'a, I>(entries: I) -> Result<LoadProfile>
where
    I: IntoIterator<Item = &'a ApplianceEntry>,
{
    let mut profile = LoadProfile::default();
    for entry in entries {
        entry.validate()?;
        if entry.quantity == 0 {
            continue;
        }
        profile.total_watts += entry.total_watts();
        profile.total_daily_kwh += entry.daily_kwh();
    }
    ensure_finite("total_watts", profile.total_watts)?;
    ensure_finite("total_daily_kwh", profile.total_daily_kwh)?;
    Ok(profile)
}

/// Per-appliance contribution row for the load summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadLine {
    pub name: String,
    pub quantity: u32,
    pub power_watts: f64,
    pub daily_hours: f64,
    pub daily_kwh: f64,
    pub priority: Priority,
}

/// Lists the contribution of each entry with a non-zero quantity.
///
/// # Errors
///
/// Same validation as [`calculate_consumption`].
pub fn load_breakdown<'a, I>(entries: I) -> Result<Vec<LoadLine>>
where
    I: IntoIterator<Item = &'a ApplianceEntry>,
{
    let mut lines = Vec::new();
    for entry in entries {
        entry.validate()?;
        if entry.quantity == 0 {
            continue;
        }
        lines.push(LoadLine {
            name: entry.name.clone(),
            quantity: entry.quantity,
            power_watts: entry.power_watts,
            daily_hours: entry.daily_hours,
            daily_kwh: ensure_finite(&format!("{}.daily_kwh", entry.name), entry.daily_kwh())?,
            priority: entry.priority,
        });
    }
    Ok(lines)
}

/// The appliances a single session is working with, keyed by name.
///
/// Insertion order is preserved for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkingSet {
    entries: Vec<ApplianceEntry>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ApplianceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApplianceEntry> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ApplianceEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut ApplianceEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| SizingError::UnknownAppliance(name.to_string()))
    }

    /// Adds a catalog appliance with quantity 1.
    ///
    /// Returns `Ok(false)` without changes when the name is already present.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAppliance` if `name` is not in the catalog.
    pub fn add_from_catalog(&mut self, name: &str) -> Result<bool> {
        let spec = appliances::find(name)
            .ok_or_else(|| SizingError::UnknownAppliance(name.to_string()))?;
        if self.contains(spec.name) {
            return Ok(false);
        }
        self.entries.push(ApplianceEntry::from_catalog(spec));
        Ok(true)
    }

    /// Adds a user-defined entry.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAppliance` if the name is taken, or `InvalidInput`
    /// if the entry fails validation.
    pub fn add_custom(&mut self, mut entry: ApplianceEntry) -> Result<()> {
        let trimmed = entry.name.trim();
        if trimmed.is_empty() {
            return Err(SizingError::invalid("name", "must not be empty"));
        }
        if trimmed.len() != entry.name.len() {
            entry.name = trimmed.to_string();
        }
        entry.validate()?;
        if self.contains(&entry.name) {
            return Err(SizingError::DuplicateAppliance(entry.name));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn set_quantity(&mut self, name: &str, quantity: u32) -> Result<()> {
        self.get_mut(name)?.quantity = quantity;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` for negative or non-finite hours.
    pub fn set_hours(&mut self, name: &str, daily_hours: f64) -> Result<()> {
        let hours = ensure_non_negative("daily_hours", daily_hours)?;
        self.get_mut(name)?.daily_hours = hours;
        Ok(())
    }

    pub fn set_priority(&mut self, name: &str, priority: Priority) -> Result<()> {
        self.get_mut(name)?.priority = priority;
        Ok(())
    }

    /// Removes an entry and returns it.
    pub fn remove(&mut self, name: &str) -> Result<ApplianceEntry> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| SizingError::UnknownAppliance(name.to_string()))?;
        Ok(self.entries.remove(idx))
    }

    /// Load profile over the whole set.
    pub fn profile(&self) -> Result<LoadProfile> {
        let profile = calculate_consumption(&self.entries)?;
        debug!(
            appliances = self.entries.len(),
            total_watts = profile.total_watts,
            daily_kwh = profile.total_daily_kwh,
            "computed load profile"
        );
        Ok(profile)
    }
}

impl<'a> IntoIterator for &'a WorkingSet {
    type Item = &'a ApplianceEntry;
    type IntoIter = std::slice::Iter<'a, ApplianceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
