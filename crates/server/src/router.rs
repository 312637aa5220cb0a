//! HTTP router construction.
//!
//! Assembles all Axum routes and middleware into a single `Router`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/jobs", get(api::jobs_list).post(api::jobs_create))
        .route("/api/jobs/{id}", get(api::jobs_get))
        .route("/api/jobs/{id}/results", get(api::jobs_results))
        .route("/api/jobs/{id}/download", get(api::jobs_download))
        .route("/api/jobs/{id}/stop", post(api::jobs_stop))
        .route("/api/admin/jobs", get(api::admin_jobs))
        .route("/api/admin/stats", get(api::admin_stats))
        .route("/api/states", get(api::states_list))
        .route("/api/states/{state}/cities", get(api::state_cities))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
