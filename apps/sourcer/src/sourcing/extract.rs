//! Structured extraction — turns a free-text job description into a `JobRecord`.
//!
//! This is the one terminal-failure stage: if the extraction backend is
//! unreachable the error propagates to the caller, because nothing downstream
//! is meaningful without the structured record.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, ChatModel};
use crate::sourcing::prompts::JD_EXTRACT_PROMPT_TEMPLATE;

/// Extraction runs deterministically.
const EXTRACTION_TEMPERATURE: f32 = 0.0;

/// Structured job information extracted once per run; immutable afterward.
/// `keywords` is the comma-separated skill list as the backend returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub keywords: String,
}

/// Extraction backend response shape: `{"job_info": [{title, location, keywords}]}`.
#[derive(Debug, Deserialize)]
struct ExtractionEnvelope {
    #[serde(default)]
    job_info: Vec<JobRecord>,
}

/// Extracts a `JobRecord` from raw JD text via one schema-guided LLM call.
/// Always yields a record; fields the model cannot fill come back as empty
/// strings, never as a missing object.
pub async fn extract_job_record(
    jd_text: &str,
    chat: &dyn ChatModel,
) -> Result<JobRecord, AppError> {
    let prompt = JD_EXTRACT_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    let content = chat
        .complete(JSON_ONLY_SYSTEM, &prompt, EXTRACTION_TEMPERATURE)
        .await?;

    let envelope: ExtractionEnvelope = serde_json::from_str(strip_json_fences(&content))?;
    Ok(envelope.job_info.into_iter().next().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserializes_job_info() {
        let json = r#"{
            "job_info": [
                {"title": "Backend Engineer", "location": "Austin, TX", "keywords": "Go, Postgres"}
            ]
        }"#;
        let envelope: ExtractionEnvelope = serde_json::from_str(json).unwrap();
        let record = envelope.job_info.into_iter().next().unwrap();
        assert_eq!(record.title, "Backend Engineer");
        assert_eq!(record.location, "Austin, TX");
        assert_eq!(record.keywords, "Go, Postgres");
    }

    #[test]
    fn test_missing_fields_default_to_empty_strings() {
        let json = r#"{"job_info": [{"title": "AI Engineer"}]}"#;
        let envelope: ExtractionEnvelope = serde_json::from_str(json).unwrap();
        let record = envelope.job_info.into_iter().next().unwrap();
        assert_eq!(record.title, "AI Engineer");
        assert_eq!(record.location, "");
        assert_eq!(record.keywords, "");
    }

    #[test]
    fn test_empty_job_info_falls_back_to_default_record() {
        let json = r#"{"job_info": []}"#;
        let envelope: ExtractionEnvelope = serde_json::from_str(json).unwrap();
        let record = envelope.job_info.into_iter().next().unwrap_or_default();
        assert_eq!(record.title, "");
        assert_eq!(record.location, "");
        assert_eq!(record.keywords, "");
    }
}
