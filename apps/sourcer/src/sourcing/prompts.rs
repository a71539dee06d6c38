// All LLM prompt constants for the sourcing pipeline.
// Cross-cutting fragments live in llm_client::prompts.

/// JD extraction prompt template. Replace `{jd_text}` before sending.
/// Schema-guided: exactly three fields, with few-shot examples per field.
pub const JD_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract the job title, location, and required skills from the job description below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "job_info": [
    {
      "title": "The job title",
      "location": "Job location",
      "keywords": "Comma-separated list of required skills or tools"
    }
  ]
}

Field examples:

TITLE:
- "We are looking for an AI Engineer to join our team." => "AI Engineer"
- "As a Machine Learning Engineer, you will work on cutting-edge models." => "Machine Learning Engineer"

LOCATION:
- "This is a remote role based in the US." => "Remote - US"
- "The position is in San Francisco, CA." => "San Francisco, CA"

KEYWORDS:
- "Required skills: Python, LangChain, OpenAI" => "Python, LangChain, OpenAI"
- "Must know NLP, embeddings, and ChromaDB" => "NLP, embeddings, ChromaDB"

Every field must be present in the output. Use an empty string for anything
the job description does not state.

JOB DESCRIPTION:
{jd_text}"#;

/// System prompt for title expansion.
pub const TITLE_EXPANSION_SYSTEM: &str =
    "You're a sourcing assistant helping find candidates on LinkedIn.";

/// Title expansion prompt template.
/// Replace: {count}, {title}, {location}, {keywords}.
pub const TITLE_EXPANSION_PROMPT_TEMPLATE: &str = r#"You are a technical recruiter.

Here is a job description summary:
- Title: {title}
- Location: {location}
- Keywords: {keywords}

Suggest {count} alternate job titles for the same role.
Only return a hyphen-bulleted list like:
- Title 1
- Title 2
- Title 3

Do not number the titles and do not add commentary."#;

/// System prompt for candidate scoring — enforces JSON-only output.
pub const SCORING_SYSTEM: &str =
    "You are a JSON-only evaluator assistant. You return valid JSON only.";

/// Candidate scoring prompt template.
/// Replace: {rubric}, {profile_json}, {linkedin_url}.
pub const SCORING_PROMPT_TEMPLATE: &str = r#"You are an expert technical recruiter.

Your task is to rate a candidate based on the provided LinkedIn profile data and the scoring rubric below.

Rubric:
{rubric}

Profile Data: {profile_json}

Return **only** a valid JSON object in this format:
{
  "name": "Full Name (or 'Unknown' if not present)",
  "linkedin_url": "{linkedin_url}",
  "fit_score": <float from 1.0 to 10.0>,
  "score_breakdown": {
    "education": <float>,
    "trajectory": <float>,
    "company": <float>,
    "skills": <float>,
    "location": <float>,
    "tenure": <float>
  }
}

Only return the JSON. Do not include explanations, markdown, or commentary."#;

/// System prompt for outreach message crafting.
pub const MESSAGING_SYSTEM: &str = "You're a recruiter writing LinkedIn connection messages.";

/// Outreach message prompt template.
/// Replace: {name}, {linkedin_url}.
pub const MESSAGING_PROMPT_TEMPLATE: &str = r#"You are an AI sourcing assistant.

Craft a short and friendly LinkedIn message to reach out to this candidate for an ML Research Engineer role in Mountain View, CA.

Use the candidate's name. Avoid sounding too formal or robotic. Make the message feel personal and warm.

Candidate name: {name}
LinkedIn: {linkedin_url}

Format your reply with ONLY the message text."#;
