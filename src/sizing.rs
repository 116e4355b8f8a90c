//! Solar array and battery sizing.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{LocationResolver, ResolvedLocation};
use crate::error::{Result, SizingError, ensure_finite, ensure_non_negative, ensure_positive};

/// Fraction of array output that reaches the loads after inverter and wiring losses.
pub const SYSTEM_EFFICIENCY: f64 = 0.85;

/// Array and battery capacity required to cover a daily demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizingResult {
    /// Required array capacity (kWp).
    pub required_kwp: f64,
    /// Battery capacity for the requested autonomy (kWh).
    pub battery_kwh: f64,
    /// Irradiance the array was sized against (kWh/m²/day).
    pub irradiance_used: f64,
}

/// Sizes a system with the default [`SYSTEM_EFFICIENCY`].
///
/// `required_kwp = daily_kwh / (irradiance * 0.85)` and
/// `battery_kwh = daily_kwh * autonomy_days`.
///
/// # Errors
///
/// Returns `InvalidInput` for negative demand, non-positive irradiance, or
/// zero autonomy days.
pub fn size_system(daily_kwh: f64, irradiance: f64, autonomy_days: u32) -> Result<SizingResult> {
    size_system_with_efficiency(daily_kwh, irradiance, autonomy_days, SYSTEM_EFFICIENCY)
}

/// Sizes a system with an explicit system efficiency in `(0, 1]`.
pub fn size_system_with_efficiency(
    daily_kwh: f64,
    irradiance: f64,
    autonomy_days: u32,
    system_efficiency: f64,
) -> Result<SizingResult> {
    let daily_kwh = ensure_non_negative("daily_kwh", daily_kwh)?;
    let irradiance = ensure_positive("irradiance", irradiance)?;
    let efficiency = ensure_positive("system_efficiency", system_efficiency)?;
    if efficiency > 1.0 {
        return Err(SizingError::invalid(
            "system_efficiency",
            format!("must be <= 1, got {efficiency}"),
        ));
    }
    if autonomy_days == 0 {
        return Err(SizingError::invalid("autonomy_days", "must be >= 1"));
    }

    Ok(SizingResult {
        required_kwp: ensure_finite("required_kwp", daily_kwh / (irradiance * efficiency))?,
        battery_kwh: ensure_finite("battery_kwh", daily_kwh * f64::from(autonomy_days))?,
        irradiance_used: irradiance,
    })
}

/// Location-aware sizing: resolves a city then applies [`size_system_with_efficiency`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizer {
    pub resolver: LocationResolver,
    pub system_efficiency: f64,
}

impl Default for Sizer {
    fn default() -> Self {
        Self {
            resolver: LocationResolver::default(),
            system_efficiency: SYSTEM_EFFICIENCY,
        }
    }
}

impl Sizer {
    /// Sizes a system for `daily_kwh` at `location`.
    ///
    /// Returns the resolved location alongside the result so callers can
    /// report when the fallback irradiance was used.
    pub fn size(
        &self,
        daily_kwh: f64,
        location: &str,
        autonomy_days: u32,
    ) -> Result<(ResolvedLocation, SizingResult)> {
        let resolved = self.resolver.resolve(location)?;
        let sizing = size_system_with_efficiency(
            daily_kwh,
            resolved.irradiance,
            autonomy_days,
            self.system_efficiency,
        )?;
        debug!(
            location = %resolved.name,
            daily_kwh,
            required_kwp = sizing.required_kwp,
            battery_kwh = sizing.battery_kwh,
            "sized system"
        );
        Ok((resolved, sizing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LocationPolicy;

    #[test]
    fn ten_kwh_at_five_irradiance_two_days() {
        let r = size_system(10.0, 5.0, 2).unwrap();
        assert!((r.required_kwp - 10.0 / 4.25).abs() < 1e-12);
        assert!((r.required_kwp - 2.352_941).abs() < 1e-6);
        assert_eq!(r.battery_kwh, 20.0);
        assert_eq!(r.irradiance_used, 5.0);
    }

    #[test]
    fn zero_demand_is_zero_system() {
        let r = size_system(0.0, 4.5, 3).unwrap();
        assert_eq!(r.required_kwp, 0.0);
        assert_eq!(r.battery_kwh, 0.0);
    }

    #[test]
    fn division_hazards_are_invalid_input() {
        assert!(matches!(
            size_system(5.0, 0.0, 2),
            Err(SizingError::InvalidInput { .. })
        ));
        assert!(size_system_with_efficiency(5.0, 5.0, 2, 0.0).is_err());
        assert!(size_system_with_efficiency(5.0, 5.0, 2, 1.5).is_err());
    }

    #[test]
    fn bad_demand_and_autonomy_are_rejected() {
        assert!(size_system(-1.0, 5.0, 2).is_err());
        assert!(size_system(f64::NAN, 5.0, 2).is_err());
        assert!(size_system(1.0, 5.0, 0).is_err());
    }

    #[test]
    fn overflowing_results_are_invalid() {
        assert!(matches!(
            size_system(1e308, 5.0, 2),
            Err(SizingError::InvalidInput { .. })
        ));
        // tiny irradiance times efficiency blows the array size up
        assert!(size_system_with_efficiency(1e300, 1e-10, 1, 1e-10).is_err());
    }

    #[test]
    fn sizing_is_monotonic_in_demand() {
        let mut prev = size_system(0.0, 4.8, 2).unwrap();
        for step in 1..=50 {
            let next = size_system(f64::from(step) * 0.7, 4.8, 2).unwrap();
            assert!(next.required_kwp >= prev.required_kwp);
            assert!(next.battery_kwh >= prev.battery_kwh);
            prev = next;
        }
    }

    #[test]
    fn sizer_uses_city_irradiance() {
        let (loc, r) = Sizer::default().size(9.0, "Kano", 1).unwrap();
        assert_eq!(loc.name, "Kano");
        assert_eq!(r.irradiance_used, 5.8);
    }

    #[test]
    fn sizer_unknown_city_uses_fallback() {
        let (loc, r) = Sizer::default().size(9.0, "Timbuktu", 1).unwrap();
        assert!(loc.is_fallback);
        assert_eq!(r.irradiance_used, 5.0);
    }

    #[test]
    fn sizer_reject_policy_propagates() {
        let sizer = Sizer {
            resolver: LocationResolver {
                policy: LocationPolicy::Reject,
                fallback_irradiance: 5.0,
            },
            ..Sizer::default()
        };
        assert!(matches!(
            sizer.size(9.0, "Timbuktu", 1),
            Err(SizingError::UnknownLocation(_))
        ));
    }
}
