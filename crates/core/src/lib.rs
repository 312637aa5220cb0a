pub mod config;
pub mod error;
pub mod record;

pub use config::{CatalogConfig, Config, ScraperConfig, ServerConfig};
pub use error::*;
pub use record::*;
