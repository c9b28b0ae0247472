use std::time::Duration;

use anyhow::{Context, Result};

/// Base URL of the hosted prediction service, used when `PREDICTION_API_URL` is unset.
pub const DEFAULT_PREDICTION_API_URL: &str = "https://aim-capstone.onrender.com";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so startup only fails on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the prediction service, without a trailing slash.
    pub prediction_api_url: String,
    /// Client timeout for the prediction call. `None` leaves the transport default.
    pub prediction_timeout: Option<Duration>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let prediction_api_url = std::env::var("PREDICTION_API_URL")
            .map(|url| normalize_base_url(&url))
            .unwrap_or_else(|_| DEFAULT_PREDICTION_API_URL.to_string());

        let prediction_timeout = match std::env::var("PREDICTION_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Ok(Config {
            prediction_api_url,
            prediction_timeout,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Trims whitespace and trailing slashes so `{base}/predict` never doubles up.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("PREDICTION_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"))?;
    Ok(Duration::from_secs(secs))
}
