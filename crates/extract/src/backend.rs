//! Extraction backend trait and error types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use leadmap_core::BusinessRecord;

/// One unit of extraction work: a search term scoped to a single city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionQuery {
    /// Free-text business category (e.g. "Restaurants").
    pub category: String,
    /// City identifier as requested by the caller (e.g. "Los Angeles, California").
    pub city: String,
    /// Maximum number of records to return for this city.
    pub limit: usize,
}

/// Extraction failures come in two tiers with different blast radius:
/// transient errors are retried and then absorbed as a skipped city, while
/// backend errors end the whole job.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extraction failed for {city}: {reason}")]
    Transient { city: String, reason: String },

    #[error("extraction backend error: {0}")]
    Backend(String),
}

impl ExtractError {
    /// Whether the runner may retry this city and keep the job alive.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExtractError::Transient { .. })
    }
}

/// Capability that turns a (category, city, limit) query into business listings.
///
/// Implementations own their automation resource (browser session, HTTP
/// client) for the duration of one call; nothing is shared across
/// concurrently running jobs.
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Extract up to `query.limit` listings for one city.
    ///
    /// Returning fewer records than the limit is normal (small towns). May
    /// suspend for the full duration of a page crawl.
    async fn extract(&self, query: &ExtractionQuery) -> Result<Vec<BusinessRecord>, ExtractError>;
}

/// Placeholder backend used when `EXTRACTOR_ENDPOINT` is not configured.
///
/// The server still starts and serves reads; jobs fail fast with a clear
/// cause instead of hanging.
pub struct UnconfiguredExtractor;

#[async_trait]
impl ExtractionBackend for UnconfiguredExtractor {
    async fn extract(&self, _query: &ExtractionQuery) -> Result<Vec<BusinessRecord>, ExtractError> {
        Err(ExtractError::Backend(
            "no extraction backend configured (set EXTRACTOR_ENDPOINT)".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tiers() {
        let transient = ExtractError::Transient {
            city: "Nowhere".to_string(),
            reason: "results feed missing".to_string(),
        };
        assert!(transient.is_transient());
        assert!(!ExtractError::Backend("browser gone".to_string()).is_transient());
    }

    #[test]
    fn test_transient_error_message_names_city() {
        let err = ExtractError::Transient {
            city: "San Diego, California".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "extraction failed for San Diego, California: timeout"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_extractor_fails_fatally() {
        let backend = UnconfiguredExtractor;
        let query = ExtractionQuery {
            category: "Restaurants".to_string(),
            city: "Los Angeles, California".to_string(),
            limit: 5,
        };
        let err = backend.extract(&query).await.unwrap_err();
        assert!(!err.is_transient());
    }
}
