//! REST API over the catalogs, the estimator and the optimizer.
//!
//! Routes:
//! - `GET /catalog/appliances`, `/catalog/panels`, `/catalog/cities`
//! - `GET /vendors?city=..&specialty=..` and `GET /vendors/cities`
//! - `POST /estimate` and `POST /optimize` with an appliance list

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::SiteConfig;

pub use types::{ErrorResponse, EstimateRequest, VendorQuery};

/// Shared, read-only server state.
pub struct AppState {
    /// Site, sizing and pricing defaults applied to every request.
    pub defaults: SiteConfig,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/catalog/appliances", get(handlers::list_appliances))
        .route("/catalog/panels", get(handlers::list_panels))
        .route("/catalog/cities", get(handlers::list_cities))
        .route("/vendors", get(handlers::list_vendors))
        .route("/vendors/cities", get(handlers::list_vendor_cities))
        .route("/estimate", post(handlers::post_estimate))
        .route("/optimize", post(handlers::post_optimize))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
