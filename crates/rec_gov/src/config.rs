use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::RecGovError;

/// Configuration for [`crate::RecGovClient`].
#[derive(Debug, Clone)]
pub struct RecGovConfig {
    /// Base URL of the internal camping API (default: https://www.recreation.gov/api)
    pub base_url: String,

    /// Per-request timeout (default: 30 seconds)
    pub timeout: Duration,

    /// How many times a failed request is retried (default: 3)
    pub max_retries: u32,

    /// Delay before the first retry, doubled on each further attempt (default: 500ms)
    pub retry_base_delay: Duration,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for RecGovConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.recreation.gov/api".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl RecGovConfig {
    /// Build a configuration from `REC_GOV_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, RecGovError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RecGovError> {
        let mut config = Self::default();

        if let Some(base_url) = lookup("REC_GOV_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "REC_GOV_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = parse_var::<u32>(&lookup, "REC_GOV_MAX_RETRIES")? {
            config.max_retries = retries;
        }
        if let Some(millis) = parse_var::<u64>(&lookup, "REC_GOV_RETRY_DELAY_MS")? {
            config.retry_base_delay = Duration::from_millis(millis);
        }
        if let Some(user_agent) = lookup("REC_GOV_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, RecGovError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| RecGovError::Config(format!("{} has an invalid value: '{}'", key, raw))),
    }
}
