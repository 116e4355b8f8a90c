//! Static reference tables consumed by the calculators.

/// Appliance catalog and priority tiers.
pub mod appliances;
/// Nigerian cities with average solar irradiance.
pub mod cities;
/// Commercial solar panel catalog.
pub mod panels;
pub mod vendors;

// Re-export the main types for convenience
pub use appliances::{APPLIANCES, ApplianceSpec, Priority};
pub use cities::{CITIES, City, DEFAULT_IRRADIANCE, LocationPolicy, LocationResolver, ResolvedLocation};
pub use panels::{PANELS, PanelSpec};
pub use vendors::{Specialty, SpecialtyFilter, VENDORS, Vendor};
