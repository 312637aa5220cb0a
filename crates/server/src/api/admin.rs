//! Admin views: all jobs and aggregate counts.
//!
//! Read-only consumers of the job store; admin gating happens upstream.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api::jobs::JobStatusResponse;
use crate::jobs::store::StoreStats;
use crate::state::AppState;

/// GET /api/admin/jobs: every job from every owner, newest first.
pub async fn admin_jobs(State(state): State<Arc<AppState>>) -> Json<Vec<JobStatusResponse>> {
    let jobs = state
        .jobs
        .list_all()
        .into_iter()
        .map(JobStatusResponse::from_snapshot)
        .collect();
    Json(jobs)
}

/// GET /api/admin/stats: job counts by status plus collected result rows.
pub async fn admin_stats(State(state): State<Arc<AppState>>) -> Json<StoreStats> {
    Json(state.jobs.stats())
}
