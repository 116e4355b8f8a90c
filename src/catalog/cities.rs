use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SizingError, ensure_positive};

/// Irradiance assumed for locations missing from [`CITIES`] (kWh/m²/day).
pub const DEFAULT_IRRADIANCE: f64 = 5.0;

/// A city and its average daily solar irradiance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    pub name: &'static str,
    /// Average irradiance (kWh/m²/day).
    pub irradiance: f64,
}

pub const CITIES: &[City] = &[
    City { name: "Lagos", irradiance: 4.5 },
    City { name: "Abuja", irradiance: 5.2 },
    City { name: "Kano", irradiance: 5.8 },
    City { name: "Ibadan", irradiance: 4.8 },
    City { name: "Port Harcourt", irradiance: 4.2 },
    City { name: "Kaduna", irradiance: 5.5 },
    City { name: "Benin City", irradiance: 4.4 },
    City { name: "Jos", irradiance: 5.7 },
    City { name: "Ilorin", irradiance: 5.1 },
    City { name: "Maiduguri", irradiance: 6.0 },
];

/// Looks up a city by name, ignoring ASCII case and surrounding whitespace.
pub fn find(name: &str) -> Option<&'static City> {
    let wanted = name.trim();
    CITIES.iter().find(|c| c.name.eq_ignore_ascii_case(wanted))
}

/// What to do when a location is not in the irradiance table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPolicy {
    /// Use the configured fallback irradiance.
    #[default]
    Fallback,
    /// Fail with [`SizingError::UnknownLocation`].
    Reject,
}

/// Outcome of resolving a location to an irradiance value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    /// Canonical city name, or the input as given when the fallback was used.
    pub name: String,
    /// Irradiance used for sizing (kWh/m²/day).
    pub irradiance: f64,
    /// Whether the fallback value was substituted.
    pub is_fallback: bool,
}

/// Maps location names to irradiance under an explicit missing-key policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationResolver {
    pub policy: LocationPolicy,
    pub fallback_irradiance: f64,
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self {
            policy: LocationPolicy::Fallback,
            fallback_irradiance: DEFAULT_IRRADIANCE,
        }
    }
}

impl LocationResolver {
    /// Resolves `location` against [`CITIES`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownLocation` under [`LocationPolicy::Reject`] when the
    /// city is missing, and `InvalidInput` when the fallback irradiance is
    /// not a positive number.
    pub fn resolve(&self, location: &str) -> Result<ResolvedLocation> {
        if let Some(city) = find(location) {
            return Ok(ResolvedLocation {
                name: city.name.to_string(),
                irradiance: city.irradiance,
                is_fallback: false,
            });
        }

        match self.policy {
            LocationPolicy::Reject => Err(SizingError::UnknownLocation(location.trim().to_string())),
            LocationPolicy::Fallback => {
                let irradiance = ensure_positive("fallback_irradiance", self.fallback_irradiance)?;
                warn!(location, irradiance, "location not in irradiance table, using fallback");
                Ok(ResolvedLocation {
                    name: location.trim().to_string(),
                    irradiance,
                    is_fallback: true,
                })
            }
        }
    }
}
