use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Missing required variables abort startup; every external client takes
/// its credentials from here, never from ambient process state.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub tavily_api_key: String,
    pub rapidapi_key: String,
    pub rapidapi_host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            tavily_api_key: require_env("TAVILY_API_KEY")?,
            rapidapi_key: require_env("RAPIDAPI_KEY")?,
            rapidapi_host: std::env::var("RAPIDAPI_HOST")
                .unwrap_or_else(|_| "fresh-linkedin-profile-data.p.rapidapi.com".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
