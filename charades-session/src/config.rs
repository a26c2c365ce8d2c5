use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub word_batch_limit: Option<u32>,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            word_batch_limit: None,
        }
    }

    /// Read `CHARADES_API_BASE_URL`, `CHARADES_REQUEST_TIMEOUT_MS` and
    /// `CHARADES_WORD_BATCH_LIMIT`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url = lookup("CHARADES_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_ms = match lookup("CHARADES_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid CHARADES_REQUEST_TIMEOUT_MS: {}", raw))?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        let word_batch_limit = match lookup("CHARADES_WORD_BATCH_LIMIT") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u32>()
                    .with_context(|| format!("Invalid CHARADES_WORD_BATCH_LIMIT: {}", raw))?,
            ),
            None => None,
        };

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_millis(request_timeout_ms),
            word_batch_limit,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
