// Client configuration
// Every value can be overridden through CODENOVA_* environment variables

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.code.eurl.dev";
pub const DEFAULT_SHARE_ORIGIN: &str = "https://code.eurl.dev";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
/// About five minutes at the default interval
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value '{value}' for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the judge backend
    pub api_url: String,
    /// Origin that share links are built against
    pub share_origin: String,
    pub poll_interval: Duration,
    /// Not-ready answers tolerated before polling gives up
    pub max_poll_attempts: u32,
    /// Per-request timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            share_origin: DEFAULT_SHARE_ORIGIN.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CODENOVA_API_URL") {
            config.api_url = url;
        }
        if let Some(origin) = lookup("CODENOVA_SHARE_ORIGIN") {
            config.share_origin = origin;
        }
        if let Some(raw) = lookup("CODENOVA_POLL_INTERVAL_MS") {
            let ms = parse_positive("CODENOVA_POLL_INTERVAL_MS", &raw)?;
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("CODENOVA_MAX_POLL_ATTEMPTS") {
            let attempts = parse_positive("CODENOVA_MAX_POLL_ATTEMPTS", &raw)?;
            config.max_poll_attempts = u32::try_from(attempts).map_err(|e| ConfigError {
                key: "CODENOVA_MAX_POLL_ATTEMPTS",
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(raw) = lookup("CODENOVA_REQUEST_TIMEOUT_MS") {
            let ms = parse_positive("CODENOVA_REQUEST_TIMEOUT_MS", &raw)?;
            config.request_timeout = Some(Duration::from_millis(ms));
        }

        tracing::debug!(
            api_url = %config.api_url,
            share_origin = %config.share_origin,
            poll_interval_ms = config.poll_interval.as_millis() as u64,
            max_poll_attempts = config.max_poll_attempts,
            "Client configuration loaded"
        );

        Ok(config)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError {
            key,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}
