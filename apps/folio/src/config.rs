use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::ANTHROPIC_API_URL;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub llm_timeout: Duration,
    /// Optional JSON file replacing the built-in portfolio content.
    pub site_content_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_API_URL.to_string()),
            llm_timeout: Duration::from_secs(
                std::env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            site_content_path: std::env::var("SITE_CONTENT_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
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
