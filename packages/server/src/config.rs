use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::kernel::{DEFAULT_FACT_CHECK_URL, DEFAULT_SEARCH_URL};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_api_url: Option<String>,
    pub gemini_model: Option<String>,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    pub search_url: String,
    pub fact_check_url: String,
    pub chrome_executable: Option<PathBuf>,
    pub reuse_trusted_domains: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            gemini_api_url: non_empty_var("GEMINI_API_URL"),
            gemini_model: non_empty_var("GEMINI_MODEL"),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "claim-verifier".to_string()),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            search_url: non_empty_var("SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            fact_check_url: non_empty_var("FACT_CHECK_URL")
                .unwrap_or_else(|| DEFAULT_FACT_CHECK_URL.to_string()),
            chrome_executable: non_empty_var("CHROME_EXECUTABLE").map(PathBuf::from),
            reuse_trusted_domains: parse_flag(&env::var("REUSE_TRUSTED_DOMAINS").unwrap_or_default()),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Comma-separated origin list.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
