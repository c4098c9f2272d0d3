//! Axum router construction for the query API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so browser map frontends on other origins can query it.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the query server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /info/{report_number}` -- single report by identifier
/// - `GET /state-reports` -- reports by state
/// - `GET /county-reports` -- reports by county
/// - `GET /nearby-sightings` -- radius search around a geocoded location
/// - `GET /time-period-search` -- year-range search
/// - `GET /word-search` -- keyword search
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Query API
        .route("/info/{report_number}", get(handlers::report_info))
        .route("/state-reports", get(handlers::state_reports))
        .route("/county-reports", get(handlers::county_reports))
        .route("/nearby-sightings", get(handlers::nearby_sightings))
        .route("/time-period-search", get(handlers::time_period_search))
        .route("/word-search", get(handlers::word_search))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
