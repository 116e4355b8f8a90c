//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, EstimateRequest, VendorQuery};
use crate::catalog::vendors::{find_vendors, vendor_cities};
use crate::catalog::{APPLIANCES, ApplianceSpec, CITIES, City, PANELS, PanelSpec, SpecialtyFilter, Vendor};
use crate::estimate::{Estimator, SystemEstimate};
use crate::load::WorkingSet;
use crate::optimizer::OptimizationReport;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl ToString) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// `GET /catalog/appliances` → 200 + the appliance catalog
pub async fn list_appliances() -> Json<&'static [ApplianceSpec]> {
    Json(APPLIANCES)
}

/// `GET /catalog/panels` → 200 + the panel catalog
pub async fn list_panels() -> Json<&'static [PanelSpec]> {
    Json(PANELS)
}

/// `GET /catalog/cities` → 200 + cities with their irradiance
pub async fn list_cities() -> Json<&'static [City]> {
    Json(CITIES)
}

/// `GET /vendors/cities` → 200 + cities with at least one listed vendor
pub async fn list_vendor_cities() -> Json<Vec<&'static str>> {
    Json(vendor_cities())
}

/// Returns vendors in a city, optionally narrowed to one specialty.
///
/// `GET /vendors?city=Lagos` → 200 + `Vec<Vendor>` JSON
/// `GET /vendors?city=Lagos&specialty=Commercial` → filtered list
/// `GET /vendors?city=Lagos&specialty=Rooftop` → 400 + `ErrorResponse`
pub async fn list_vendors(
    Query(query): Query<VendorQuery>,
) -> Result<Json<Vec<&'static Vendor>>, ApiError> {
    let filter = match query.specialty.as_deref() {
        Some(s) => s.parse::<SpecialtyFilter>().map_err(bad_request)?,
        None => SpecialtyFilter::All,
    };
    Ok(Json(find_vendors(&query.city, filter)))
}

/// Merges the request over the server defaults and builds the working set.
fn prepare(state: &AppState, req: &EstimateRequest) -> Result<(Estimator, WorkingSet), ApiError> {
    let cfg = req.to_config(&state.defaults);
    let errors = cfg.validate();
    if !errors.is_empty() {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(bad_request(joined.join("; ")));
    }
    let set = cfg.working_set().map_err(bad_request)?;
    Ok((Estimator::from_config(&cfg), set))
}

/// Full estimate for the posted appliance list.
///
/// `POST /estimate` → 200 + `SystemEstimate` JSON, or 400 on invalid input
pub async fn post_estimate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateRequest>,
) -> Result<Json<SystemEstimate>, ApiError> {
    let (estimator, set) = prepare(&state, &req)?;
    estimator.estimate(&set).map(Json).map_err(bad_request)
}

/// Scenario comparison for the posted appliance list.
///
/// `POST /optimize` → 200 + `OptimizationReport` JSON, or 400 on invalid input
pub async fn post_optimize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateRequest>,
) -> Result<Json<OptimizationReport>, ApiError> {
    let (estimator, set) = prepare(&state, &req)?;
    estimator.optimize(&set).map(Json).map_err(bad_request)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::SiteConfig;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            defaults: SiteConfig::default(),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or_default())
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or_default())
    }

    #[tokio::test]
    async fn catalogs_return_200() {
        let (status, json) = get_json("/catalog/appliances").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(APPLIANCES.len()));

        let (status, json) = get_json("/catalog/panels").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["name"], "Monocrystalline 300W");

        let (_, json) = get_json("/catalog/cities").await;
        assert_eq!(json.as_array().map(Vec::len), Some(CITIES.len()));
    }

    #[tokio::test]
    async fn vendors_filtered_by_specialty() {
        let (status, json) = get_json("/vendors?city=Lagos&specialty=Commercial").await;
        assert_eq!(status, StatusCode::OK);
        let list = json.as_array().cloned().unwrap_or_default();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["name"], "GreenTech Solar");
    }

    #[tokio::test]
    async fn vendor_cities_listed() {
        let (status, json) = get_json("/vendors/cities").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!(["Lagos", "Abuja", "Kano"]));
    }

    #[tokio::test]
    async fn vendors_unknown_specialty_returns_400() {
        let (status, json) = get_json("/vendors?city=Lagos&specialty=Rooftop").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn estimate_returns_sized_system() {
        let (status, json) = post_json(
            "/estimate",
            r#"{"appliances":[{"name":"Refrigerator (Energy Efficient)"}]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let kwh = json["load"]["total_daily_kwh"].as_f64().unwrap_or_default();
        assert!((kwh - 3.6).abs() < 1e-9);
        assert_eq!(json["location"]["name"], "Lagos");
        assert_eq!(json["best_panel"]["panel"]["name"], "Polycrystalline 400W");
    }

    #[tokio::test]
    async fn estimate_rejects_incomplete_custom_appliance() {
        let (status, json) =
            post_json("/estimate", r#"{"appliances":[{"name":"Mystery Box"}]}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap_or("").contains("appliances[0]"));
    }

    #[tokio::test]
    async fn optimize_returns_three_scenarios() {
        let (status, json) = post_json(
            "/optimize",
            r#"{"appliances":[{"name":"Laptop"},{"name":"Iron"}],"max_budget":100000000}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcomes"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["recommended"], "all_appliances");
    }

    #[tokio::test]
    async fn optimize_negative_budget_returns_400() {
        let (status, _) = post_json(
            "/optimize",
            r#"{"appliances":[{"name":"Laptop"}],"max_budget":-5}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
