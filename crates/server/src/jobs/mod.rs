//! Scraping job orchestration: store, sequencer, runner, and job model.

pub mod runner;
pub mod sequencer;
pub mod store;
pub mod types;

pub use runner::spawn_scrape_job;
pub use store::{JobStore, JobStoreError};
pub use types::{JobSnapshot, JobStatus, ScrapeJob};
