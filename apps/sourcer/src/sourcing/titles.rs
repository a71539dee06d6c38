//! Title expansion — generates alternate job titles from the structured record.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::sourcing::extract::JobRecord;
use crate::sourcing::prompts::{TITLE_EXPANSION_PROMPT_TEMPLATE, TITLE_EXPANSION_SYSTEM};

/// How many alternate titles the expansion prompt asks for.
pub const DEFAULT_TITLE_SUGGESTIONS: usize = 5;

/// Title generation is a creative task.
const EXPANSION_TEMPERATURE: f32 = 0.7;

/// Expands the job record into at most `count` title variants, each suffixed
/// with the record's location. An empty model reply yields an empty list, not
/// an error; downstream stages treat that as "no candidates found".
pub async fn expand_titles(
    record: &JobRecord,
    chat: &dyn ChatModel,
    count: usize,
) -> Result<Vec<String>, AppError> {
    let prompt = TITLE_EXPANSION_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{title}", &record.title)
        .replace("{location}", &record.location)
        .replace("{keywords}", &record.keywords);

    let content = chat
        .complete(TITLE_EXPANSION_SYSTEM, &prompt, EXPANSION_TEMPERATURE)
        .await?;

    let variants = parse_title_variants(&content, &record.location, count);
    info!("Expanded '{}' into {} title variants", record.title, variants.len());
    Ok(variants)
}

/// Parses a hyphen-bulleted model reply into title variants.
/// Only lines starting with `-` count; the marker and surrounding whitespace
/// are stripped. The location is appended as `", <location>"` when non-empty,
/// so a variant always splits cleanly on its first comma later.
pub fn parse_title_variants(content: &str, location: &str, count: usize) -> Vec<String> {
    let location = location.trim();
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('-'))
        .map(|line| line.trim_start_matches(['-', ' ']))
        .filter(|title| !title.is_empty())
        .map(|title| {
            if location.is_empty() {
                title.to_string()
            } else {
                format!("{title}, {location}")
            }
        })
        .take(count)
        .collect()
}
