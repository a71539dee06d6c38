//! Candidate scoring — rates each normalized profile against a free-text
//! rubric via the LLM.
//!
//! Scoring never drops items: every input profile yields exactly one
//! `ScoredCandidate`, in input order. Failures (empty reply, malformed JSON,
//! transport error) are coalesced into a sentinel record tagged with a
//! `failed` outcome so callers can tell it apart from a genuine 0.0 score.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::llm_client::{strip_json_fences, ChatModel, LlmError};
use crate::sourcing::normalize::profile_url;
use crate::sourcing::prompts::{SCORING_PROMPT_TEMPLATE, SCORING_SYSTEM};

/// Scoring runs near-deterministically.
const SCORING_TEMPERATURE: f32 = 0.3;

const UNKNOWN_NAME: &str = "Unknown";

/// The six rubric dimensions the model scores individually.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default)]
    pub education: f64,
    #[serde(default)]
    pub trajectory: f64,
    #[serde(default)]
    pub company: f64,
    #[serde(default)]
    pub skills: f64,
    #[serde(default)]
    pub location: f64,
    #[serde(default)]
    pub tenure: f64,
}

/// Whether a candidate's scores came from the model or from the failure
/// sentinel. A sentinel keeps the classic shape (0.0 everywhere, name
/// "Unknown") but is distinguishable here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScoreOutcome {
    Scored,
    Failed { reason: String },
}

/// One scored candidate. `linkedin_url` is always the input profile's URL,
/// regardless of what the model echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub name: String,
    pub linkedin_url: String,
    /// 0.0 – 10.0; 0.0 is also the sentinel value, see `outcome`.
    pub fit_score: f64,
    pub score_breakdown: ScoreBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub outcome: ScoreOutcome,
}

impl ScoredCandidate {
    /// The sentinel emitted when scoring a profile fails.
    pub fn failed(linkedin_url: String, reason: String) -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            linkedin_url,
            fit_score: 0.0,
            score_breakdown: ScoreBreakdown::default(),
            explanation: None,
            outcome: ScoreOutcome::Failed { reason },
        }
    }
}

/// What the scoring prompt asks the model to return. The echoed
/// `linkedin_url` is accepted but ignored in favor of the input URL.
#[derive(Debug, Deserialize)]
struct ScorePayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    fit_score: f64,
    #[serde(default)]
    score_breakdown: ScoreBreakdown,
    #[serde(default)]
    explanation: Option<String>,
}

/// Scores every profile, 1:1 and order-preserving.
pub async fn score_candidates(
    profiles: &[Value],
    rubric: &str,
    chat: &dyn ChatModel,
) -> Vec<ScoredCandidate> {
    let mut scored = Vec::with_capacity(profiles.len());

    for profile in profiles {
        let url = profile_url(profile).unwrap_or_default().to_string();
        let candidate = match score_one(profile, &url, rubric, chat).await {
            Ok(candidate) => candidate,
            Err(reason) => {
                warn!("Scoring failed for {url}: {reason}");
                ScoredCandidate::failed(url, reason)
            }
        };
        scored.push(candidate);
    }

    scored
}

/// One scoring call. All failure cases collapse into an `Err(reason)` that
/// the caller turns into the sentinel.
async fn score_one(
    profile: &Value,
    url: &str,
    rubric: &str,
    chat: &dyn ChatModel,
) -> Result<ScoredCandidate, String> {
    let prompt = SCORING_PROMPT_TEMPLATE
        .replace("{rubric}", rubric)
        .replace("{profile_json}", &profile.to_string())
        .replace("{linkedin_url}", url);

    let content = chat
        .complete(SCORING_SYSTEM, &prompt, SCORING_TEMPERATURE)
        .await
        .map_err(|e: LlmError| format!("scoring call failed: {e}"))?;

    if content.trim().is_empty() {
        return Err("empty model response".to_string());
    }

    let payload: ScorePayload = serde_json::from_str(strip_json_fences(&content))
        .map_err(|e| format!("model returned invalid JSON: {e}"))?;

    let name = if payload.name.trim().is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        payload.name
    };

    Ok(ScoredCandidate {
        name,
        linkedin_url: url.to_string(),
        fit_score: payload.fit_score.clamp(0.0, 10.0),
        score_breakdown: payload.score_breakdown,
        explanation: payload.explanation,
        outcome: ScoreOutcome::Scored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sourcing::testing::ScriptedChat;
    use serde_json::json;

    fn profile(url: &str) -> Value {
        json!({"linkedin_url": url, "name": "Alice Anderson"})
    }

    fn score_reply(name: &str, url: &str, fit: f64) -> String {
        json!({
            "name": name,
            "linkedin_url": url,
            "fit_score": fit,
            "score_breakdown": {
                "education": 8.0,
                "trajectory": 7.0,
                "company": 6.5,
                "skills": 9.0,
                "location": 10.0,
                "tenure": 5.0
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_valid_reply_produces_scored_candidate() {
        let url = "https://linkedin.com/in/alice";
        let chat = ScriptedChat::new(vec![Ok(&score_reply("Alice Anderson", url, 8.5))]);

        let scored = score_candidates(&[profile(url)], "rubric", &chat).await;
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].name, "Alice Anderson");
        assert_eq!(scored[0].fit_score, 8.5);
        assert_eq!(scored[0].outcome, ScoreOutcome::Scored);
    }

    #[tokio::test]
    async fn test_input_url_overrides_model_echo() {
        let url = "https://linkedin.com/in/alice";
        let reply = score_reply("Alice Anderson", "https://linkedin.com/in/not-alice", 8.5);
        let chat = ScriptedChat::new(vec![Ok(&reply)]);

        let scored = score_candidates(&[profile(url)], "rubric", &chat).await;
        assert_eq!(scored[0].linkedin_url, url);
    }

    #[tokio::test]
    async fn test_malformed_json_yields_sentinel() {
        let url = "https://linkedin.com/in/alice";
        let chat = ScriptedChat::new(vec![Ok("I think this candidate is great!")]);

        let scored = score_candidates(&[profile(url)], "rubric", &chat).await;
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].name, "Unknown");
        assert_eq!(scored[0].linkedin_url, url);
        assert_eq!(scored[0].fit_score, 0.0);
        assert_eq!(scored[0].score_breakdown, ScoreBreakdown::default());
        assert!(matches!(scored[0].outcome, ScoreOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_empty_reply_yields_sentinel() {
        let chat = ScriptedChat::new(vec![Ok("")]);
        let scored =
            score_candidates(&[profile("https://linkedin.com/in/bob")], "rubric", &chat).await;
        assert!(matches!(
            &scored[0].outcome,
            ScoreOutcome::Failed { reason } if reason.contains("empty")
        ));
    }

    #[tokio::test]
    async fn test_transport_error_yields_sentinel_and_batch_continues() {
        let url_a = "https://linkedin.com/in/alice";
        let url_b = "https://linkedin.com/in/bob";
        let reply = score_reply("Bob", url_b, 6.0);
        let chat = ScriptedChat::new(vec![Err(()), Ok(&reply)]);

        let scored =
            score_candidates(&[profile(url_a), profile(url_b)], "rubric", &chat).await;
        assert_eq!(scored.len(), 2);
        assert!(matches!(scored[0].outcome, ScoreOutcome::Failed { .. }));
        assert_eq!(scored[0].linkedin_url, url_a);
        assert_eq!(scored[1].outcome, ScoreOutcome::Scored);
        assert_eq!(scored[1].linkedin_url, url_b);
    }

    #[tokio::test]
    async fn test_one_output_per_input_in_order() {
        let urls = [
            "https://linkedin.com/in/a",
            "https://linkedin.com/in/b",
            "https://linkedin.com/in/c",
        ];
        let replies: Vec<String> = urls
            .iter()
            .map(|u| score_reply("Someone", u, 5.0))
            .collect();
        let chat = ScriptedChat::new(replies.iter().map(|r| Ok(r.as_str())).collect());

        let profiles: Vec<Value> = urls.iter().map(|u| profile(u)).collect();
        let scored = score_candidates(&profiles, "rubric", &chat).await;

        assert_eq!(scored.len(), profiles.len());
        for (candidate, url) in scored.iter().zip(urls.iter()) {
            assert_eq!(candidate.linkedin_url, *url);
        }
    }

    #[tokio::test]
    async fn test_out_of_range_fit_score_is_clamped() {
        let url = "https://linkedin.com/in/alice";
        let reply = score_reply("Alice", url, 42.0);
        let chat = ScriptedChat::new(vec![Ok(&reply)]);

        let scored = score_candidates(&[profile(url)], "rubric", &chat).await;
        assert_eq!(scored[0].fit_score, 10.0);
    }

    #[tokio::test]
    async fn test_fenced_json_reply_is_accepted() {
        let url = "https://linkedin.com/in/alice";
        let reply = format!("```json\n{}\n```", score_reply("Alice", url, 7.0));
        let chat = ScriptedChat::new(vec![Ok(&reply)]);

        let scored = score_candidates(&[profile(url)], "rubric", &chat).await;
        assert_eq!(scored[0].outcome, ScoreOutcome::Scored);
        assert_eq!(scored[0].fit_score, 7.0);
    }

    #[test]
    fn test_sentinel_serializes_with_failed_status() {
        let sentinel = ScoredCandidate::failed(
            "https://linkedin.com/in/alice".to_string(),
            "empty model response".to_string(),
        );
        let value = serde_json::to_value(&sentinel).unwrap();
        assert_eq!(value["outcome"]["status"], "failed");
        assert_eq!(value["fit_score"], 0.0);
        assert_eq!(value["score_breakdown"]["education"], 0.0);
    }
}
