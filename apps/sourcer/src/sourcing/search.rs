//! Profile search — resolves title variants to candidate profile URLs via the
//! Tavily search API.
//!
//! Failure isolation: one failed query contributes zero URLs and never aborts
//! the batch. Only a missing API key is fatal, at construction time.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;

/// Marker every kept URL must contain.
pub const PROFILE_PATH_MARKER: &str = "linkedin.com/in/";
/// Hard cap on the merged, deduplicated URL set.
pub const MAX_PROFILE_URLS: usize = 7;
/// Bounded result count requested per title variant.
pub const DEFAULT_RESULTS_PER_TITLE: usize = 4;

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

/// Search backend seam. The pipeline holds `Arc<dyn ProfileSearch>` so tests
/// can substitute a mock.
#[async_trait]
pub trait ProfileSearch: Send + Sync {
    /// Returns a duplicate-free list of profile URLs, capped at
    /// [`MAX_PROFILE_URLS`]. May be empty.
    async fn search(&self, variants: &[String]) -> Result<Vec<String>, AppError>;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    include_answer: bool,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    url: String,
}

/// Tavily-backed implementation of [`ProfileSearch`].
pub struct TavilySearcher {
    client: reqwest::Client,
    api_key: String,
    results_per_title: usize,
}

impl TavilySearcher {
    pub fn new(api_key: String) -> Result<Self, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "TAVILY_API_KEY is not set".to_string(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            results_per_title: DEFAULT_RESULTS_PER_TITLE,
        })
    }
}

#[async_trait]
impl ProfileSearch for TavilySearcher {
    async fn search(&self, variants: &[String]) -> Result<Vec<String>, AppError> {
        let mut all_urls = Vec::new();

        for variant in variants {
            let query = build_profile_query(variant);
            let request = SearchRequest {
                query: &query,
                search_depth: "basic",
                include_answer: false,
                max_results: self.results_per_title,
            };

            let response = match self
                .client
                .post(TAVILY_SEARCH_URL)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    warn!("Search request failed for '{variant}': {e}");
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!("Search API failed for '{variant}': {status} - {body}");
                continue;
            }

            match response.json::<SearchResponse>().await {
                Ok(parsed) => {
                    all_urls.extend(
                        parsed
                            .results
                            .into_iter()
                            .map(|hit| hit.url)
                            .filter(|url| url.contains(PROFILE_PATH_MARKER)),
                    );
                }
                Err(e) => warn!("Search response for '{variant}' was not valid JSON: {e}"),
            }
        }

        Ok(dedupe_and_cap(all_urls, MAX_PROFILE_URLS))
    }
}

/// Splits a title variant on its first comma into (title, location).
/// Variants without a comma have an empty location.
pub(crate) fn split_variant(variant: &str) -> (&str, &str) {
    match variant.split_once(',') {
        Some((title, location)) => (title.trim(), location.trim()),
        None => (variant.trim(), ""),
    }
}

/// Builds the site-scoped search query for one title variant.
pub(crate) fn build_profile_query(variant: &str) -> String {
    let (title, location) = split_variant(variant);
    format!("site:{PROFILE_PATH_MARKER} {title} {location}")
        .trim_end()
        .to_string()
}

/// Deduplicates by first occurrence and truncates to `cap`.
pub(crate) fn dedupe_and_cap(urls: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = urls
        .into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect();
    unique.truncate(cap);
    unique
}
