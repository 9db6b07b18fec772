use anyhow::{Context, Result};

use crate::gemini::GEMINI_API_URL;

/// Application configuration loaded from environment variables once at
/// startup. The AI credential is the only required variable; it is held
/// here for the lifetime of the process rather than read ad hoc.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// Override for the Gemini endpoint, mainly for pointing the client at
    /// a local mock server.
    pub gemini_base_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| GEMINI_API_URL.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
