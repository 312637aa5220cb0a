//! HTTP handlers, grouped by surface.

pub mod admin;
pub mod catalog;
pub mod health;
pub mod jobs;

pub use admin::{admin_jobs, admin_stats};
pub use catalog::{state_cities, states_list};
pub use health::health;
pub use jobs::{jobs_create, jobs_download, jobs_get, jobs_list, jobs_results, jobs_stop};
