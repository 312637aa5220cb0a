//! HTTP extraction backend.
//!
//! Delegates the actual DOM scraping to a headless-browser sidecar service:
//! `POST {endpoint}/extract` with an [`ExtractionQuery`] body returns a JSON
//! array of [`BusinessRecord`]. The sidecar owns selectors and browser
//! lifecycle; this backend owns pacing, timeouts, and error classification.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use leadmap_core::{BusinessRecord, ScraperConfig};

use crate::backend::{ExtractError, ExtractionBackend, ExtractionQuery};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug)]
pub struct HttpExtractor {
    client: reqwest::Client,
    extract_url: url::Url,
}

impl HttpExtractor {
    /// Build from config. Fails if the endpoint is missing or unparseable.
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ExtractError> {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| ExtractError::Backend("EXTRACTOR_ENDPOINT not set".to_string()))?;

        let base = url::Url::parse(endpoint)
            .map_err(|e| ExtractError::Backend(format!("invalid extractor endpoint: {}", e)))?;
        let extract_url = base
            .join("extract")
            .map_err(|e| ExtractError::Backend(format!("invalid extractor endpoint: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ExtractError::Backend(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            extract_url,
        })
    }
}

#[async_trait]
impl ExtractionBackend for HttpExtractor {
    async fn extract(&self, query: &ExtractionQuery) -> Result<Vec<BusinessRecord>, ExtractError> {
        debug!(city = %query.city, category = %query.category, limit = query.limit, "dispatching extraction request");

        let response = self
            .client
            .post(self.extract_url.clone())
            .json(query)
            .send()
            .await
            .map_err(|e| classify_request_error(&query.city, e))?;

        let status = response.status();
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            // Sidecar overloaded or mid-crash, worth retrying this city.
            return Err(ExtractError::Transient {
                city: query.city.clone(),
                reason: format!("sidecar returned HTTP {}", status),
            });
        }
        if !status.is_success() {
            return Err(ExtractError::Backend(format!(
                "sidecar rejected extraction request: HTTP {}",
                status
            )));
        }

        let mut records: Vec<BusinessRecord> = response
            .json()
            .await
            .map_err(|e| ExtractError::Backend(format!("malformed sidecar response: {}", e)))?;

        if records.len() > query.limit {
            warn!(
                city = %query.city,
                returned = records.len(),
                limit = query.limit,
                "sidecar returned more records than requested, truncating"
            );
            records.truncate(query.limit);
        }

        Ok(records)
    }
}

/// Connection-level failures are fatal (the sidecar is gone); timeouts are
/// transient (one slow city page should not end the job).
fn classify_request_error(city: &str, err: reqwest::Error) -> ExtractError {
    if err.is_timeout() {
        ExtractError::Transient {
            city: city.to_string(),
            reason: format!("request timed out: {}", err),
        }
    } else if err.is_connect() {
        ExtractError::Backend(format!("extraction sidecar unreachable: {}", err))
    } else {
        ExtractError::Transient {
            city: city.to_string(),
            reason: err.to_string(),
        }
    }
}
