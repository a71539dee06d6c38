//! Outreach message crafting — drafts one first-contact message per scored
//! candidate.
//!
//! 1:1 and order-preserving like scoring: a failed generation produces an
//! empty `message` string, never a missing candidate. Callers must read an
//! empty string as "generation failed", not "intentionally blank".

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::ChatModel;
use crate::sourcing::prompts::{MESSAGING_PROMPT_TEMPLATE, MESSAGING_SYSTEM};
use crate::sourcing::score::ScoredCandidate;

/// Message drafting is a creative task.
const MESSAGING_TEMPERATURE: f32 = 0.7;

/// One drafted outreach message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachMessage {
    pub name: String,
    pub linkedin_url: String,
    /// Empty when generation failed.
    pub message: String,
}

/// Drafts one message per candidate, preserving order and URL.
pub async fn craft_messages(
    candidates: &[ScoredCandidate],
    chat: &dyn ChatModel,
) -> Vec<OutreachMessage> {
    let mut messages = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let prompt = MESSAGING_PROMPT_TEMPLATE
            .replace("{name}", &candidate.name)
            .replace("{linkedin_url}", &candidate.linkedin_url);

        let message = match chat
            .complete(MESSAGING_SYSTEM, &prompt, MESSAGING_TEMPERATURE)
            .await
        {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Message generation failed for {}: {e}", candidate.name);
                String::new()
            }
        };

        messages.push(OutreachMessage {
            name: candidate.name.clone(),
            linkedin_url: candidate.linkedin_url.clone(),
            message,
        });
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sourcing::testing::ScriptedChat;

    fn candidate(name: &str, url: &str) -> ScoredCandidate {
        ScoredCandidate {
            name: name.to_string(),
            linkedin_url: url.to_string(),
            fit_score: 7.0,
            score_breakdown: Default::default(),
            explanation: None,
            outcome: crate::sourcing::score::ScoreOutcome::Scored,
        }
    }

    #[tokio::test]
    async fn test_one_message_per_candidate_in_order() {
        let candidates = vec![
            candidate("Alice", "https://linkedin.com/in/alice"),
            candidate("Bob", "https://linkedin.com/in/bob"),
        ];
        let chat = ScriptedChat::new(vec![Ok("Hi Alice!"), Ok("Hi Bob!")]);

        let messages = craft_messages(&candidates, &chat).await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].name, "Alice");
        assert_eq!(messages[0].linkedin_url, "https://linkedin.com/in/alice");
        assert_eq!(messages[0].message, "Hi Alice!");
        assert_eq!(messages[1].name, "Bob");
        assert_eq!(messages[1].message, "Hi Bob!");
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_candidate_with_empty_message() {
        let candidates = vec![
            candidate("Alice", "https://linkedin.com/in/alice"),
            candidate("Bob", "https://linkedin.com/in/bob"),
        ];
        let chat = ScriptedChat::new(vec![Err(()), Ok("Hi Bob!")]);

        let messages = craft_messages(&candidates, &chat).await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message, "");
        assert_eq!(messages[0].linkedin_url, "https://linkedin.com/in/alice");
        assert_eq!(messages[1].message, "Hi Bob!");
    }

    #[tokio::test]
    async fn test_message_text_is_trimmed() {
        let candidates = vec![candidate("Alice", "https://linkedin.com/in/alice")];
        let chat = ScriptedChat::new(vec![Ok("  Hi Alice!\n\n")]);

        let messages = craft_messages(&candidates, &chat).await;
        assert_eq!(messages[0].message, "Hi Alice!");
    }
}
