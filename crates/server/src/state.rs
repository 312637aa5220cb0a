use std::sync::Arc;

use tracing::{info, warn};

use leadmap_core::{Config, ScraperConfig};
use leadmap_extract::{ExtractionBackend, HttpExtractor, UnconfiguredExtractor};

use crate::catalog::CityCatalog;
use crate::jobs::JobStore;

pub struct AppState {
    pub jobs: JobStore,
    pub backend: Arc<dyn ExtractionBackend>,
    pub catalog: CityCatalog,
    pub scraper: ScraperConfig,
}

/// Build shared state from config. The extraction backend is optional
/// infrastructure: when unconfigured the server still starts and serves
/// reads, and every job fails fast with a clear cause.
pub fn build_app_state(config: &Config) -> Arc<AppState> {
    let backend: Arc<dyn ExtractionBackend> = if config.scraper.is_configured() {
        match HttpExtractor::from_config(&config.scraper) {
            Ok(extractor) => {
                info!(
                    "Extraction sidecar configured at {}",
                    config.scraper.endpoint.as_deref().unwrap_or_default()
                );
                Arc::new(extractor)
            }
            Err(e) => {
                warn!("Failed to build HTTP extractor ({}), jobs will fail fast", e);
                Arc::new(UnconfiguredExtractor)
            }
        }
    } else {
        warn!("EXTRACTOR_ENDPOINT not set, scraping jobs will fail fast");
        Arc::new(UnconfiguredExtractor)
    };

    let catalog = CityCatalog::load(&config.catalog);

    Arc::new(AppState {
        jobs: JobStore::new(),
        backend,
        catalog,
        scraper: config.scraper.clone(),
    })
}

impl AppState {
    /// State with a caller-supplied backend and no pacing delays.
    #[cfg(test)]
    pub(crate) fn for_tests(backend: Arc<dyn ExtractionBackend>) -> Self {
        Self {
            jobs: JobStore::new(),
            backend,
            catalog: CityCatalog::built_in(),
            scraper: ScraperConfig {
                endpoint: None,
                request_timeout_secs: 5,
                city_retries: 1,
                retry_delay_ms: 0,
                city_delay_ms: 0,
            },
        }
    }
}
