use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Nothing is required: without `REDIS_URL` the workspace lives in memory.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub redis_url: Option<String>,
    pub store_namespace: String,
    /// Used for Gemini when the user has not saved a key of their own.
    pub gemini_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            redis_url: optional_env("REDIS_URL"),
            store_namespace: optional_env("STORE_NAMESPACE")
                .unwrap_or_else(|| "briefly:".to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
