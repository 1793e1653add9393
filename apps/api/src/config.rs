use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The inference credential is deliberately NOT part of the configuration:
/// it is supplied per request by the caller and never persisted or logged.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Chat-completions endpoint of the inference provider. Overridable so
    /// tests and alternative OpenAI-compatible deployments can point elsewhere.
    pub inference_url: String,
    /// Timeout applied to the single outbound diagnosis request.
    pub llm_timeout_secs: u64,
    /// When an expert filter matches nothing, fall back to a random sample so
    /// the caller never sees an empty list. Demo behavior — switchable off.
    pub demo_fallback: bool,
}

const DEFAULT_INFERENCE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            inference_url: std::env::var("INFERENCE_URL")
                .unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a positive integer")?,
            demo_fallback: std::env::var("DEMO_FALLBACK")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        })
    }
}
