use anyhow::{Context, Result};

use crate::template::MINIMUM_VIABLE_DOCUMENT_LEN;

/// Application configuration loaded from environment variables.
/// Every variable has a default; nothing is required at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Severity threshold for the template repair pipeline: documents below
    /// this length are rebuilt rather than patched.
    pub min_template_len: usize,
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
            min_template_len: std::env::var("MIN_TEMPLATE_LEN")
                .unwrap_or_else(|_| MINIMUM_VIABLE_DOCUMENT_LEN.to_string())
                .parse::<usize>()
                .context("MIN_TEMPLATE_LEN must be a non-negative integer")?,
        })
    }
}
