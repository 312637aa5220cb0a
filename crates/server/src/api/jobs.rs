//! Job creation, polling, stop, and download handlers.
//!
//! [`JobStatusResponse`] is the status projection: the one place where the
//! internal job representation is mapped to the externally published shape,
//! so the two can diverge without touching the store.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use leadmap_core::BusinessRecord;

use crate::export::render_csv;
use crate::jobs::{spawn_scrape_job, JobSnapshot, JobStatus, JobStoreError};
use crate::state::AppState;

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub category: String,
    pub cities: Vec<String>,
    #[serde(default = "default_max_results")]
    pub max_results_per_city: usize,
}

fn default_max_results() -> usize {
    10
}

/// Externally visible job shape consumed by polling clients.
#[derive(Debug, Serialize)]
pub struct JobStatusResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub progress: u8,
    pub total_cities: usize,
    pub current_city: String,
    pub results: Vec<BusinessRecord>,
    pub logs: Vec<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobStatusResponse {
    /// Pure field selection/renaming from a store snapshot.
    pub fn from_snapshot(snap: JobSnapshot) -> Self {
        Self {
            job_id: snap.id,
            status: snap.status,
            progress: snap.progress,
            total_cities: snap.cities.len(),
            current_city: snap.current_city,
            results: snap.results,
            logs: snap.logs,
            error: snap.error,
            created_at: snap.created_at,
            completed_at: snap.completed_at,
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

type ApiError = (StatusCode, Json<Value>);

fn store_error(err: JobStoreError) -> ApiError {
    let status = match err {
        JobStoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        JobStoreError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

/// Requesting principal, as asserted by the auth layer in front of us.
/// Opaque here; approval/authorization decisions happen upstream.
fn owner_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .unwrap_or("anonymous")
        .to_string()
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /api/jobs: create a job and start its runner. Returns before any
/// extraction work happens.
pub async fn jobs_create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobStatusResponse>), ApiError> {
    let owner = owner_from_headers(&headers);
    let job = state
        .jobs
        .create(
            owner,
            request.category,
            request.cities,
            request.max_results_per_city,
        )
        .map_err(store_error)?;

    let snapshot = job.snapshot();
    spawn_scrape_job(state.clone(), job);

    Ok((
        StatusCode::CREATED,
        Json(JobStatusResponse::from_snapshot(snapshot)),
    ))
}

/// GET /api/jobs: the calling principal's jobs, newest first.
pub async fn jobs_list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Vec<JobStatusResponse>> {
    let owner = owner_from_headers(&headers);
    let jobs = state
        .jobs
        .list(&owner)
        .into_iter()
        .map(JobStatusResponse::from_snapshot)
        .collect();
    Json(jobs)
}

/// GET /api/jobs/{id}: poll a job's status.
pub async fn jobs_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobStatusResponse>, ApiError> {
    let snapshot = state.jobs.get(id).map_err(store_error)?;
    Ok(Json(JobStatusResponse::from_snapshot(snapshot)))
}

/// GET /api/jobs/{id}/results: the results accumulated so far. Partial
/// results of a running or failed job are a feature, not an error.
pub async fn jobs_results(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let snapshot = state.jobs.get(id).map_err(store_error)?;
    Ok(Json(json!({
        "job_id": snapshot.id,
        "total_results": snapshot.results.len(),
        "results": snapshot.results,
    })))
}

/// GET /api/jobs/{id}/download: CSV rendering of a terminal job's results.
pub async fn jobs_download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let snapshot = state.jobs.get(id).map_err(store_error)?;
    if !snapshot.status.is_terminal() {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "job is still running" })),
        ));
    }
    Ok(Json(json!({
        "filename": format!("business_results_{}.csv", snapshot.id),
        "content": render_csv(&snapshot.results),
        "content_type": "text/csv",
    })))
}

/// POST /api/jobs/{id}/stop: advisory cancellation; the runner observes the
/// flag between city steps.
pub async fn jobs_stop(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let job = state.jobs.get_job(id).map_err(store_error)?;
    if job.status().is_terminal() {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "job already finished" })),
        ));
    }
    job.request_stop();
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "job_id": id, "stopping": true })),
    ))
}
