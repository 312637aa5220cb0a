//! Job model for the scraping orchestrator.
//!
//! A [`ScrapeJob`] splits into an immutable identity (request parameters,
//! fixed at creation) and a [`JobProgress`] block behind a single `RwLock`.
//! Every mutation that must appear atomic to a polling reader takes that
//! write lock exactly once, so `get`/`list` snapshots are never torn.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leadmap_core::BusinessRecord;

/// Lifecycle of a scraping job: `pending → running → {completed, failed}`.
/// Terminal states are absorbing; the job is frozen afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Mutable job state, the single unit of synchronization.
#[derive(Debug)]
pub(crate) struct JobProgress {
    pub status: JobStatus,
    /// 0–100, monotone while running; 100 exactly when completed.
    pub progress: u8,
    /// City currently being processed, empty when not running.
    pub current_city: String,
    /// Append-only; visible incrementally while the job runs.
    pub results: Vec<BusinessRecord>,
    /// Append-only human-readable event lines.
    pub logs: Vec<String>,
    /// Set exactly once, on the transition to failed.
    pub error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// One scraping request spanning one or more cities.
///
/// The job runner is the sole writer; any number of polling readers take
/// point-in-time [`JobSnapshot`]s concurrently.
#[derive(Debug)]
pub struct ScrapeJob {
    pub id: Uuid,
    /// Opaque requesting principal (authentication lives elsewhere).
    pub owner: String,
    pub category: String,
    /// Requested cities in caller order; duplicates are kept.
    pub cities: Vec<String>,
    pub max_results_per_city: usize,
    pub created_at: DateTime<Utc>,
    state: RwLock<JobProgress>,
    cancel: AtomicBool,
}

impl ScrapeJob {
    pub(crate) fn new(
        owner: String,
        category: String,
        cities: Vec<String>,
        max_results_per_city: usize,
    ) -> Self {
        let first_log = format!("Job created for category: {}", category);
        Self {
            id: Uuid::new_v4(),
            owner,
            category,
            cities,
            max_results_per_city,
            created_at: Utc::now(),
            state: RwLock::new(JobProgress {
                status: JobStatus::Pending,
                progress: 0,
                current_city: String::new(),
                results: Vec::new(),
                logs: vec![first_log],
                error: None,
                completed_at: None,
            }),
            cancel: AtomicBool::new(false),
        }
    }

    /// Consistent point-in-time copy for readers.
    pub fn snapshot(&self) -> JobSnapshot {
        let state = self.state.read().unwrap();
        JobSnapshot {
            id: self.id,
            owner: self.owner.clone(),
            category: self.category.clone(),
            cities: self.cities.clone(),
            max_results_per_city: self.max_results_per_city,
            created_at: self.created_at,
            status: state.status,
            progress: state.progress,
            current_city: state.current_city.clone(),
            results: state.results.clone(),
            logs: state.logs.clone(),
            error: state.error.clone(),
            completed_at: state.completed_at,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.state.read().unwrap().status
    }

    // ── Cancellation ─────────────────────────────────────────────

    /// Advisory stop request; the runner observes it between city steps.
    pub fn request_stop(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn stop_requested(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    // ── Runner-side mutations ────────────────────────────────────
    //
    // Each mutator is inert once the job is terminal, which enforces the
    // frozen-job invariant even against a misbehaving caller.

    pub(crate) fn set_running(&self) {
        let mut state = self.state.write().unwrap();
        if state.status != JobStatus::Pending {
            return;
        }
        state.status = JobStatus::Running;
    }

    pub(crate) fn append_log(&self, line: String) {
        let mut state = self.state.write().unwrap();
        if state.status.is_terminal() {
            return;
        }
        state.logs.push(line);
    }

    /// Mark a city as in flight: sets `current_city` and logs, atomically.
    pub(crate) fn begin_city(&self, city: &str, position: usize, total: usize) {
        let mut state = self.state.write().unwrap();
        if state.status.is_terminal() {
            return;
        }
        state.current_city = city.to_string();
        state
            .logs
            .push(format!("Processing city {}/{}: {}", position, total, city));
    }

    /// Record a successful city: appends results, logs the count, and bumps
    /// progress in one write-lock acquisition so readers never see a torn
    /// combination.
    pub(crate) fn record_city_success(
        &self,
        city: &str,
        records: Vec<BusinessRecord>,
        progress: u8,
    ) {
        let mut state = self.state.write().unwrap();
        if state.status.is_terminal() {
            return;
        }
        state
            .logs
            .push(format!("Found {} businesses in {}", records.len(), city));
        state.results.extend(records);
        state.progress = state.progress.max(progress.min(100));
    }

    /// Record a skipped city (retry budget exhausted). Progress still
    /// advances; a skip is absorbed, not fatal.
    pub(crate) fn record_city_skipped(&self, city: &str, reason: &str, progress: u8) {
        let mut state = self.state.write().unwrap();
        if state.status.is_terminal() {
            return;
        }
        state
            .logs
            .push(format!("Skipped {} after retries: {}", city, reason));
        state.progress = state.progress.max(progress.min(100));
    }

    pub(crate) fn set_completed(&self) {
        let mut state = self.state.write().unwrap();
        if state.status.is_terminal() {
            return;
        }
        let total = state.results.len();
        state.status = JobStatus::Completed;
        state.progress = 100;
        state.current_city.clear();
        state.completed_at = Some(Utc::now());
        state.logs.push(format!(
            "Job completed successfully. Total businesses found: {}",
            total
        ));
    }

    /// Freeze the job as failed. Progress and partial results keep their
    /// last values and stay queryable.
    pub(crate) fn set_failed(&self, error: String) {
        let mut state = self.state.write().unwrap();
        if state.status.is_terminal() {
            return;
        }
        state.status = JobStatus::Failed;
        state.current_city.clear();
        state.completed_at = Some(Utc::now());
        state.logs.push(format!("Job failed with error: {}", error));
        state.error = Some(error);
    }
}

/// Immutable point-in-time copy of a job, as handed to readers.
#[derive(Debug, Clone, Serialize)]
pub struct JobSnapshot {
    pub id: Uuid,
    pub owner: String,
    pub category: String,
    pub cities: Vec<String>,
    pub max_results_per_city: usize,
    pub created_at: DateTime<Utc>,
    pub status: JobStatus,
    pub progress: u8,
    pub current_city: String,
    pub results: Vec<BusinessRecord>,
    pub logs: Vec<String>,
    pub error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadmap_extract::scripted::sample_records;
    use leadmap_extract::ExtractionQuery;

    fn test_job() -> ScrapeJob {
        ScrapeJob::new(
            "alice".to_string(),
            "Restaurants".to_string(),
            vec!["Los Angeles, California".to_string()],
            5,
        )
    }

    fn records(city: &str, count: usize) -> Vec<BusinessRecord> {
        sample_records(
            &ExtractionQuery {
                category: "Restaurants".to_string(),
                city: city.to_string(),
                limit: count,
            },
            count,
        )
    }

    #[test]
    fn test_status_serde() {
        for (variant, expected) in [
            (JobStatus::Pending, "pending"),
            (JobStatus::Running, "running"),
            (JobStatus::Completed, "completed"),
            (JobStatus::Failed, "failed"),
        ] {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, format!("\"{}\"", expected));
            let parsed: JobStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, variant);
        }
    }

    #[test]
    fn test_new_job_is_pending_with_creation_log() {
        let job = test_job();
        let snap = job.snapshot();
        assert_eq!(snap.status, JobStatus::Pending);
        assert_eq!(snap.progress, 0);
        assert!(snap.results.is_empty());
        assert_eq!(snap.logs, vec!["Job created for category: Restaurants"]);
        assert!(snap.error.is_none());
    }

    #[test]
    fn test_progress_is_monotone() {
        let job = test_job();
        job.set_running();
        job.record_city_success("A", records("A", 1), 50);
        job.record_city_skipped("B", "feed missing", 30);
        assert_eq!(job.snapshot().progress, 50);
        job.record_city_success("C", records("C", 1), 75);
        assert_eq!(job.snapshot().progress, 75);
    }

    #[test]
    fn test_progress_clamped_to_100() {
        let job = test_job();
        job.set_running();
        job.record_city_success("A", Vec::new(), 200);
        assert_eq!(job.snapshot().progress, 100);
    }

    #[test]
    fn test_completed_job_is_frozen() {
        let job = test_job();
        job.set_running();
        job.record_city_success("A", records("A", 2), 100);
        job.set_completed();

        let before = job.snapshot();
        job.append_log("late".to_string());
        job.record_city_success("B", records("B", 3), 100);
        job.set_failed("late failure".to_string());

        let after = job.snapshot();
        assert_eq!(after.status, JobStatus::Completed);
        assert_eq!(after.results.len(), before.results.len());
        assert_eq!(after.logs.len(), before.logs.len());
        assert!(after.error.is_none());
    }

    #[test]
    fn test_failed_job_keeps_partial_results_and_progress() {
        let job = test_job();
        job.set_running();
        job.record_city_success("A", records("A", 3), 33);
        job.set_failed("browser crashed".to_string());

        let snap = job.snapshot();
        assert_eq!(snap.status, JobStatus::Failed);
        assert_eq!(snap.progress, 33);
        assert_eq!(snap.results.len(), 3);
        assert_eq!(snap.error.as_deref(), Some("browser crashed"));
        assert_eq!(snap.current_city, "");

        // Error is set exactly once.
        job.set_failed("second error".to_string());
        assert_eq!(job.snapshot().error.as_deref(), Some("browser crashed"));
    }

    #[test]
    fn test_completed_clears_current_city_and_pins_progress() {
        let job = test_job();
        job.set_running();
        job.begin_city("Los Angeles, California", 1, 1);
        assert_eq!(job.snapshot().current_city, "Los Angeles, California");
        job.record_city_success("Los Angeles, California", records("LA", 5), 100);
        job.set_completed();

        let snap = job.snapshot();
        assert_eq!(snap.progress, 100);
        assert_eq!(snap.current_city, "");
        assert!(snap.completed_at.is_some());
    }

    #[test]
    fn test_set_running_only_from_pending() {
        let job = test_job();
        job.set_running();
        job.set_failed("boom".to_string());
        job.set_running();
        assert_eq!(job.snapshot().status, JobStatus::Failed);
    }

    #[test]
    fn test_stop_flag() {
        let job = test_job();
        assert!(!job.stop_requested());
        job.request_stop();
        assert!(job.stop_requested());
    }
}
