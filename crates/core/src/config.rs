use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub scraper: ScraperConfig,
    pub catalog: CatalogConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            scraper: ScraperConfig::from_env(),
            catalog: CatalogConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:   {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  scraper:  endpoint={}, timeout={}s",
            self.scraper.endpoint.as_deref().unwrap_or("(none)"),
            self.scraper.request_timeout_secs
        );
        tracing::info!(
            "  retries:  {} per city, {}ms between attempts, {}ms between cities",
            self.scraper.city_retries,
            self.scraper.retry_delay_ms,
            self.scraper.city_delay_ms
        );
        tracing::info!(
            "  catalog:  {}",
            self.catalog
                .states_cities_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8000),
        }
    }
}

// ── Scraper ───────────────────────────────────────────────────

/// Extraction backend and per-city pacing knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Base URL of the headless-browser extraction sidecar.
    /// Unset means extraction is unavailable and every job fails fast.
    pub endpoint: Option<String>,
    /// Timeout for one extraction request (a full city scrape).
    pub request_timeout_secs: u64,
    /// Retries per city before the city is skipped.
    pub city_retries: u32,
    /// Delay between retry attempts for the same city.
    pub retry_delay_ms: u64,
    /// Delay between consecutive cities.
    pub city_delay_ms: u64,
}

impl ScraperConfig {
    fn from_env() -> Self {
        Self {
            endpoint: env_opt("EXTRACTOR_ENDPOINT"),
            request_timeout_secs: env_u64("EXTRACTOR_TIMEOUT_SECS", 60),
            city_retries: env_u32("CITY_RETRIES", 1),
            retry_delay_ms: env_u64("CITY_RETRY_DELAY_MS", 1000),
            city_delay_ms: env_u64("CITY_DELAY_MS", 1000),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

// ── Catalog ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Optional JSON file overriding the built-in states/cities list.
    pub states_cities_path: Option<PathBuf>,
}

impl CatalogConfig {
    fn from_env() -> Self {
        Self {
            states_cities_path: env_opt("STATES_CITIES_PATH").map(PathBuf::from),
        }
    }
}
