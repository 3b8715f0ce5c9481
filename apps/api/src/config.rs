use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Built once in `main` and carried in `AppState` — handlers and the
/// pipeline never read env vars directly.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    /// Directory served for any route the API itself does not handle.
    pub public_dir: String,
    /// Language hint passed to the OCR engine (tesseract language code).
    pub ocr_language: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            public_dir: std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
            ocr_language: std::env::var("OCR_LANGUAGE").unwrap_or_else(|_| "eng".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
