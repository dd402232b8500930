use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://localhost:8000";
const DEFAULT_PREMIUM_CACHE_SECS: u64 = 5 * 60;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Runtime settings read from the process environment.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub access_token: Option<String>,
    pub user_email: Option<String>,
    pub premium_cache_timeout: Duration,
    pub request_timeout: Duration,
    pub log_level: tracing::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            access_token: None,
            user_email: None,
            premium_cache_timeout: Duration::from_secs(DEFAULT_PREMIUM_CACHE_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_level: tracing::Level::INFO,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let premium_cache_timeout = match get("CROWDLEX_PREMIUM_CACHE_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .with_context(|| format!("CROWDLEX_PREMIUM_CACHE_SECS is not a number: {raw}"))?,
            ),
            None => defaults.premium_cache_timeout,
        };
        let request_timeout = match get("CROWDLEX_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().with_context(|| {
                format!("CROWDLEX_REQUEST_TIMEOUT_SECS is not a number: {raw}")
            })?),
            None => defaults.request_timeout,
        };
        let log_level = match get("CROWDLEX_LOG") {
            Some(raw) => raw
                .parse::<tracing::Level>()
                .map_err(|_| anyhow::anyhow!("CROWDLEX_LOG is not a log level: {raw}"))?,
            None => defaults.log_level,
        };

        Ok(Self {
            api_base: get("CROWDLEX_API_BASE").unwrap_or(defaults.api_base),
            access_token: get("CROWDLEX_ACCESS_TOKEN"),
            user_email: get("CROWDLEX_USER_EMAIL"),
            premium_cache_timeout,
            request_timeout,
            log_level,
        })
    }
}

/// Parses `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_lines(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
