// Candidate sourcing pipeline: JD chunking, structured extraction, title
// expansion, profile search, enrichment, normalization, scoring, messaging.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod enrich;
pub mod extract;
pub mod handlers;
pub mod jd;
pub mod message;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod score;
pub mod search;
pub mod titles;
