//! Pipeline orchestration — sequences the sourcing stages.
//!
//! Flow: chunk → extract → expand titles → search → enrich → normalize →
//! (score → message), or halt right after normalization when no usable
//! candidate remains. Strictly linear, no stage re-entry; each stage hands
//! an owned, immutable collection to the next.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::artifacts::ArtifactStore;
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::sourcing::enrich::{ProfileEnrich, DEFAULT_ENRICHMENT_LIMIT};
use crate::sourcing::extract::{extract_job_record, JobRecord};
use crate::sourcing::jd::{split_jd, CHUNK_OVERLAP, CHUNK_SIZE};
use crate::sourcing::message::{craft_messages, OutreachMessage};
use crate::sourcing::normalize::normalize_profiles;
use crate::sourcing::score::{score_candidates, ScoredCandidate};
use crate::sourcing::search::ProfileSearch;
use crate::sourcing::titles::{expand_titles, DEFAULT_TITLE_SUGGESTIONS};

/// Per-stage item counts, reported at the end of every run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageCounts {
    pub chunks: usize,
    pub titles: usize,
    pub urls: usize,
    pub enriched: usize,
    pub candidates: usize,
    pub scored: usize,
    pub messages: usize,
}

/// Outcome of one end-to-end run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub job: JobRecord,
    pub counts: StageCounts,
    /// True when normalization left zero usable candidates and scoring /
    /// messaging were skipped entirely.
    pub halted: bool,
    pub scored_candidates: Vec<ScoredCandidate>,
    pub outreach_messages: Vec<OutreachMessage>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// The orchestrator. Holds the stage backends behind trait objects so the
/// whole flow is testable without network access.
pub struct SourcingPipeline {
    chat: Arc<dyn ChatModel>,
    searcher: Arc<dyn ProfileSearch>,
    enricher: Arc<dyn ProfileEnrich>,
    enrichment_limit: usize,
}

impl SourcingPipeline {
    pub fn new(
        chat: Arc<dyn ChatModel>,
        searcher: Arc<dyn ProfileSearch>,
        enricher: Arc<dyn ProfileEnrich>,
    ) -> Self {
        Self {
            chat,
            searcher,
            enricher,
            enrichment_limit: DEFAULT_ENRICHMENT_LIMIT,
        }
    }

    pub fn with_enrichment_limit(mut self, limit: usize) -> Self {
        self.enrichment_limit = limit;
        self
    }

    /// Runs the full sourcing pipeline over one job description.
    ///
    /// Extraction failure is terminal and propagates; everything after it
    /// isolates per-item failures inside its own stage. When `artifacts` is
    /// given, each stage's output is persisted right after the stage
    /// completes.
    pub async fn run(
        &self,
        jd_text: &str,
        rubric: &str,
        artifacts: Option<&ArtifactStore>,
    ) -> Result<RunSummary, AppError> {
        if jd_text.trim().is_empty() {
            return Err(AppError::Validation(
                "Job description must not be empty".to_string(),
            ));
        }

        let started_at = Utc::now();
        let mut counts = StageCounts::default();

        let chunks = split_jd(jd_text, CHUNK_SIZE, CHUNK_OVERLAP);
        counts.chunks = chunks.len();
        info!("Split job description into {} chunks", counts.chunks);
        persist(artifacts, "jd_chunks", &chunks)?;

        let job = extract_job_record(jd_text, self.chat.as_ref()).await?;
        info!(
            "Extracted structured job info: title='{}', location='{}'",
            job.title, job.location
        );
        persist(artifacts, "extracted_job_info", &job)?;

        let titles = expand_titles(&job, self.chat.as_ref(), DEFAULT_TITLE_SUGGESTIONS).await?;
        counts.titles = titles.len();
        persist(artifacts, "combined_titles", &titles)?;

        let urls = self.searcher.search(&titles).await?;
        counts.urls = urls.len();
        info!("Found {} unique profile URLs", counts.urls);
        persist(artifacts, "final_linkedin_profiles", &urls)?;

        let enriched = self.enricher.enrich(&urls, self.enrichment_limit).await?;
        counts.enriched = enriched.len();
        persist(artifacts, "enriched_profiles", &enriched)?;

        let candidates = normalize_profiles(enriched);
        counts.candidates = candidates.len();

        if candidates.is_empty() {
            warn!("No valid profiles after normalization; skipping scoring and messaging");
            return Ok(RunSummary {
                job,
                counts,
                halted: true,
                scored_candidates: Vec::new(),
                outreach_messages: Vec::new(),
                started_at,
                finished_at: Utc::now(),
            });
        }

        let scored = score_candidates(&candidates, rubric, self.chat.as_ref()).await;
        counts.scored = scored.len();
        info!("Scored {} candidates", counts.scored);
        persist(artifacts, "scored_candidates", &scored)?;

        let messages = craft_messages(&scored, self.chat.as_ref()).await;
        counts.messages = messages.len();
        info!("Generated {} outreach messages", counts.messages);
        persist(artifacts, "outreach_messages", &messages)?;

        Ok(RunSummary {
            job,
            counts,
            halted: false,
            scored_candidates: scored,
            outreach_messages: messages,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

fn persist<T: Serialize>(
    artifacts: Option<&ArtifactStore>,
    name: &str,
    value: &T,
) -> Result<(), AppError> {
    if let Some(store) = artifacts {
        store.write(name, value)?;
    }
    Ok(())
}
