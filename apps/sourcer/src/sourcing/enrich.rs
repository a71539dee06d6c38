//! Profile enrichment — fetches full profile data per URL from the RapidAPI
//! provider.
//!
//! Rate limiting is a fixed 1-second sleep between requests, a static
//! policy rather than adaptive backoff. A failed fetch is logged and skipped; the
//! batch continues with whatever succeeded.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::sourcing::normalize::ENVELOPE_KEY;

/// Second safety bound on how many URLs are fetched, applied on top of the
/// searcher's cap: only `min(limit, urls.len())` requests go out.
pub const DEFAULT_ENRICHMENT_LIMIT: usize = 10;

/// Fixed spacing between enrichment requests.
const REQUEST_SPACING: Duration = Duration::from_secs(1);

/// Enrichment backend seam. The pipeline holds `Arc<dyn ProfileEnrich>` so
/// tests can substitute a mock.
#[async_trait]
pub trait ProfileEnrich: Send + Sync {
    /// Fetches raw enriched profiles for up to `limit` URLs. Skipped items
    /// are absent from the result, never null-filled, so the output length
    /// is at most the success count.
    async fn enrich(&self, urls: &[String], limit: usize) -> Result<Vec<Value>, AppError>;
}

/// RapidAPI-backed implementation of [`ProfileEnrich`].
pub struct RapidApiEnricher {
    client: reqwest::Client,
    api_key: String,
    host: String,
}

impl RapidApiEnricher {
    pub fn new(api_key: String, host: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            host,
        }
    }

    fn endpoint(&self) -> String {
        format!("https://{}/get-linkedin-profile", self.host)
    }
}

#[async_trait]
impl ProfileEnrich for RapidApiEnricher {
    async fn enrich(&self, urls: &[String], limit: usize) -> Result<Vec<Value>, AppError> {
        let mut results = Vec::new();

        for url in urls.iter().take(limit) {
            // The query serializer percent-encodes the target URL.
            let response = match self
                .client
                .get(self.endpoint())
                .query(&[("linkedin_url", url.as_str()), ("include_skills", "true")])
                .header("X-RapidAPI-Key", &self.api_key)
                .header("X-RapidAPI-Host", &self.host)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    warn!("Enrichment request failed for {url}: {e}");
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                match response.json::<Value>().await {
                    Ok(body) => results.push(wrap_enriched(body)),
                    Err(e) => warn!("Enrichment body for {url} was not valid JSON: {e}"),
                }
            } else {
                let body = response.text().await.unwrap_or_default();
                warn!("Enrichment API failed for {url}: {status} - {body}");
            }

            tokio::time::sleep(REQUEST_SPACING).await;
        }

        info!("Enriched {} of {} profiles", results.len(), urls.len().min(limit));
        Ok(results)
    }
}

/// Wraps a raw API body under the envelope key for downstream normalization.
/// The provider sometimes nests its own envelope too, so consumers must
/// tolerate up to two layers.
pub(crate) fn wrap_enriched(body: Value) -> Value {
    json!({ ENVELOPE_KEY: body })
}
