//! In-memory job store.
//!
//! Authoritative `id → job` table behind a `RwLock<IndexMap>`. The table
//! lock only guards structural access (insert, lookup); per-job field
//! updates go through each job's own lock, so concurrently running jobs
//! never serialize on each other.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::types::{JobSnapshot, JobStatus, ScrapeJob};

#[derive(Debug, Error)]
pub enum JobStoreError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("job not found: {0}")]
    NotFound(Uuid),
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub total_jobs: usize,
    pub by_status: HashMap<&'static str, usize>,
    pub total_results: usize,
}

/// Store for active and finished scraping jobs. Process lifetime only,
/// no durability is promised.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: RwLock<IndexMap<Uuid, Arc<ScrapeJob>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a new job. Returns immediately with the job in
    /// `pending` state; no extraction work happens here. Nothing is
    /// inserted when validation fails.
    pub fn create(
        &self,
        owner: String,
        category: String,
        cities: Vec<String>,
        max_results_per_city: usize,
    ) -> Result<Arc<ScrapeJob>, JobStoreError> {
        if cities.is_empty() {
            return Err(JobStoreError::InvalidRequest(
                "cities must not be empty".to_string(),
            ));
        }
        if max_results_per_city == 0 {
            return Err(JobStoreError::InvalidRequest(
                "max_results_per_city must be positive".to_string(),
            ));
        }

        let job = Arc::new(ScrapeJob::new(owner, category, cities, max_results_per_city));
        let mut jobs = self.jobs.write().unwrap();
        jobs.insert(job.id, job.clone());
        Ok(job)
    }

    /// Live handle for the runner and the stop endpoint.
    pub fn get_job(&self, id: Uuid) -> Result<Arc<ScrapeJob>, JobStoreError> {
        let jobs = self.jobs.read().unwrap();
        jobs.get(&id).cloned().ok_or(JobStoreError::NotFound(id))
    }

    /// Point-in-time snapshot for readers.
    pub fn get(&self, id: Uuid) -> Result<JobSnapshot, JobStoreError> {
        Ok(self.get_job(id)?.snapshot())
    }

    /// Jobs belonging to one principal, newest first.
    pub fn list(&self, owner: &str) -> Vec<JobSnapshot> {
        let jobs = self.jobs.read().unwrap();
        jobs.values()
            .rev()
            .filter(|job| job.owner == owner)
            .map(|job| job.snapshot())
            .collect()
    }

    /// All jobs, newest first (admin view).
    pub fn list_all(&self) -> Vec<JobSnapshot> {
        let jobs = self.jobs.read().unwrap();
        jobs.values().rev().map(|job| job.snapshot()).collect()
    }

    pub fn stats(&self) -> StoreStats {
        let jobs = self.jobs.read().unwrap();
        let mut by_status: HashMap<&'static str, usize> = HashMap::new();
        let mut total_results = 0;
        for job in jobs.values() {
            let snap = job.snapshot();
            let key = match snap.status {
                JobStatus::Pending => "pending",
                JobStatus::Running => "running",
                JobStatus::Completed => "completed",
                JobStatus::Failed => "failed",
            };
            *by_status.entry(key).or_insert(0) += 1;
            total_results += snap.results.len();
        }
        StoreStats {
            total_jobs: jobs.len(),
            by_status,
            total_results,
        }
    }
}
