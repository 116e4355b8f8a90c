//! API request, query and error types.

use serde::{Deserialize, Serialize};

use crate::config::{ApplianceConfig, SiteConfig};

/// Body of `POST /estimate` and `POST /optimize`.
///
/// Appliances use the same shape as `[[appliances]]` in a site file. The
/// optional site fields override the server's defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateRequest {
    #[serde(default)]
    pub appliances: Vec<ApplianceConfig>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub autonomy_days: Option<u32>,
    #[serde(default)]
    pub max_budget: Option<f64>,
}

impl EstimateRequest {
    /// Merges this request over `defaults`. The request's appliance list
    /// replaces the default one.
    pub fn to_config(&self, defaults: &SiteConfig) -> SiteConfig {
        let mut cfg = defaults.clone();
        cfg.appliances = self.appliances.clone();
        if let Some(location) = &self.location {
            cfg.site.location = location.clone();
        }
        if let Some(days) = self.autonomy_days {
            cfg.site.autonomy_days = days;
        }
        if let Some(budget) = self.max_budget {
            cfg.site.max_budget = budget;
        }
        cfg
    }
}

/// Query parameters for `GET /vendors`.
#[derive(Debug, Deserialize)]
pub struct VendorQuery {
    pub city: String,
    /// Specialty label such as `"Residential"`, or `"all"`.
    pub specialty: Option<String>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
