//! Job runner: drives one job from `pending` to a terminal state.
//!
//! [`spawn_scrape_job`] is the entry point: the job is already registered in
//! the store; the runner is spawned as a fire-and-forget tokio task and is
//! the job's only writer. Per-city trouble is absorbed (1 retry, then the
//! city is skipped with a log line); only backend-level failures and
//! cooperative cancellation end the job as `failed`, with whatever partial
//! results accumulated so far left visible.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use leadmap_core::BusinessRecord;
use leadmap_extract::{ExtractError, ExtractionQuery};

use crate::state::AppState;

use super::sequencer::work_units;
use super::types::ScrapeJob;

/// Spawn the runner for a freshly created job. Returns immediately.
pub fn spawn_scrape_job(state: Arc<AppState>, job: Arc<ScrapeJob>) {
    tokio::spawn(async move {
        run_scrape_job(state, job).await;
    });
}

/// Execute one job to a terminal state. Runs exactly once per job.
pub async fn run_scrape_job(state: Arc<AppState>, job: Arc<ScrapeJob>) {
    job.set_running();
    job.append_log(format!("Starting scraping job for category: {}", job.category));
    info!(job_id = %job.id, category = %job.category, cities = job.cities.len(), "scraping job started");

    let units = work_units(&job.category, &job.cities, job.max_results_per_city);
    let total = units.len();

    for unit in units {
        // Cancellation is observed between city steps only; an in-flight
        // extraction call is never interrupted.
        if job.stop_requested() {
            info!(job_id = %job.id, "stop requested, cancelling job");
            job.set_failed("job cancelled by stop request".to_string());
            return;
        }

        let city = unit.query.city.clone();
        job.begin_city(&city, unit.index + 1, total);

        let progress = city_progress(unit.index + 1, total);
        match extract_with_retry(&state, &job, &unit.query).await {
            Ok(mut records) => {
                records.truncate(job.max_results_per_city);
                info!(job_id = %job.id, city = %city, found = records.len(), "city extraction complete");
                job.record_city_success(&city, records, progress);
            }
            Err(err) if err.is_transient() => {
                warn!(job_id = %job.id, city = %city, error = %err, "city skipped after retries");
                job.record_city_skipped(&city, &err.to_string(), progress);
            }
            Err(err) => {
                error!(job_id = %job.id, city = %city, error = %err, "fatal extraction error, failing job");
                job.set_failed(err.to_string());
                return;
            }
        }

        if unit.index + 1 < total {
            tokio::time::sleep(Duration::from_millis(state.scraper.city_delay_ms)).await;
        }
    }

    job.set_completed();
    let snap = job.snapshot();
    info!(job_id = %job.id, total_results = snap.results.len(), "scraping job completed");
}

/// Call the extraction backend for one city, retrying transient failures up
/// to the configured per-city budget.
async fn extract_with_retry(
    state: &AppState,
    job: &ScrapeJob,
    query: &ExtractionQuery,
) -> Result<Vec<BusinessRecord>, ExtractError> {
    let mut attempt = 0u32;
    loop {
        match state.backend.extract(query).await {
            Ok(records) => return Ok(records),
            Err(err) if err.is_transient() && attempt < state.scraper.city_retries => {
                attempt += 1;
                warn!(
                    job_id = %job.id,
                    city = %query.city,
                    attempt = attempt,
                    error = %err,
                    "transient extraction error, retrying city"
                );
                tokio::time::sleep(Duration::from_millis(state.scraper.retry_delay_ms)).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Progress after `completed` of `total` cities, rounded to the nearest
/// percent. Tracks cities processed, not records found.
fn city_progress(completed: usize, total: usize) -> u8 {
    ((completed as f64 / total as f64) * 100.0).round() as u8
}
