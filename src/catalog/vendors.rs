//! Local installer directory and its lookup.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::SizingError;

/// Line of business a vendor advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Specialty {
    Residential,
    Commercial,
    #[serde(rename = "Hybrid Systems")]
    HybridSystems,
    #[serde(rename = "Off-grid Systems")]
    OffGridSystems,
    #[serde(rename = "Government Projects")]
    GovernmentProjects,
    Agricultural,
}

impl Specialty {
    pub const ALL: [Specialty; 6] = [
        Specialty::Residential,
        Specialty::Commercial,
        Specialty::HybridSystems,
        Specialty::OffGridSystems,
        Specialty::GovernmentProjects,
        Specialty::Agricultural,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
            Self::HybridSystems => "Hybrid Systems",
            Self::OffGridSystems => "Off-grid Systems",
            Self::GovernmentProjects => "Government Projects",
            Self::Agricultural => "Agricultural",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Specialty {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sp| sp.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SizingError::invalid("specialty", format!("unknown specialty \"{wanted}\"")))
    }
}

/// Specialty filter for [`find_vendors`]: everything, or one exact specialty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpecialtyFilter {
    #[default]
    All,
    Only(Specialty),
}

impl SpecialtyFilter {
    pub fn matches(self, specialty: Specialty) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == specialty,
        }
    }
}

impl FromStr for SpecialtyFilter {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// A solar installer listed in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vendor {
    pub name: &'static str,
    /// Customer rating, 0 to 5. Descriptive only, never used for ranking.
    pub rating: f64,
    pub phone: &'static str,
    pub specialty: Specialty,
    pub city: &'static str,
}

const fn vendor(
    city: &'static str,
    name: &'static str,
    rating: f64,
    phone: &'static str,
    specialty: Specialty,
) -> Vendor {
    Vendor {
        name,
        rating,
        phone,
        specialty,
        city,
    }
}

pub const VENDORS: &[Vendor] = &[
    vendor("Lagos", "SolarMax Nigeria", 4.5, "08012345678", Specialty::Residential),
    vendor("Lagos", "GreenTech Solar", 4.2, "08087654321", Specialty::Commercial),
    vendor("Lagos", "PowerGen Solutions", 4.7, "08011223344", Specialty::HybridSystems),
    vendor("Abuja", "Capital Solar", 4.6, "08055667788", Specialty::Residential),
    vendor("Abuja", "Federal Solar Co.", 4.3, "08099887766", Specialty::GovernmentProjects),
    vendor("Abuja", "Sunrise Energy", 4.4, "08033445566", Specialty::OffGridSystems),
    vendor("Kano", "Northern Solar", 4.1, "08077889900", Specialty::Agricultural),
    vendor("Kano", "Sahel Power", 4.5, "08044556677", Specialty::Residential),
];

/// Returns vendors in `city` matching `filter`, in directory order.
///
/// A city without listed vendors yields an empty list.
pub fn find_vendors(city: &str, filter: SpecialtyFilter) -> Vec<&'static Vendor> {
    let wanted = city.trim();
    let found: Vec<&'static Vendor> = VENDORS
        .iter()
        .filter(|v| v.city.eq_ignore_ascii_case(wanted) && filter.matches(v.specialty))
        .collect();
    debug!(city = wanted, ?filter, count = found.len(), "vendor lookup");
    found
}

/// Cities that have at least one listed vendor, in directory order.
pub fn vendor_cities() -> Vec<&'static str> {
    let mut cities: Vec<&'static str> = Vec::new();
    for v in VENDORS {
        if !cities.contains(&v.city) {
            cities.push(v.city);
        }
    }
    cities
}
