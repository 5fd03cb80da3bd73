use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "postgres://user:pass@db:5432/resumes";
const DEFAULT_UPLOAD_DIR: &str = "/data/uploads";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODELS: &str = "gemini-2.5-flash";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Application configuration loaded from environment variables.
/// Every variable has a fallback; only malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub upload_dir: PathBuf,
    /// Missing key is not fatal: every LLM call then fails and uploads return 500.
    pub google_api_key: Option<String>,
    pub gemini_api_base: String,
    pub llm_models: Vec<String>,
    pub llm_timeout: Duration,
    pub db_max_connections: u32,
    pub db_connect_attempts: u32,
    pub db_connect_delay: Duration,
    pub reset_schema_on_startup: bool,
    pub cors_allowed_origin: String,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", DEFAULT_UPLOAD_DIR)),
            google_api_key: std::env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_api_base: env_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            llm_models: parse_model_list(&env_or("LLM_MODELS", DEFAULT_MODELS)),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 120)?),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 4)?,
            db_connect_attempts: parse_env("DB_CONNECT_ATTEMPTS", 20)?,
            db_connect_delay: Duration::from_secs(parse_env("DB_CONNECT_DELAY_SECS", 1)?),
            reset_schema_on_startup: parse_flag(
                "RESET_SCHEMA_ON_STARTUP",
                std::env::var("RESET_SCHEMA_ON_STARTUP").ok().as_deref(),
                true,
            )?,
            cors_allowed_origin: env_or("CORS_ALLOWED_ORIGIN", DEFAULT_CORS_ORIGIN),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            port: parse_env("PORT", 8000)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(key: &str, raw: Option<&str>, default: bool) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("Environment variable '{key}' must be a boolean, got '{other}'"),
    }
}

/// Splits a comma-separated model list, keeping order and dropping blanks.
/// An empty list falls back to the default candidate.
fn parse_model_list(raw: &str) -> Vec<String> {
    let models: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect();
    if models.is_empty() {
        vec![DEFAULT_MODELS.to_string()]
    } else {
        models
    }
}
