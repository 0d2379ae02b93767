//! Gateway configuration (code > env > defaults).

use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout. Generation requests are slow; the backend may
/// take minutes to produce a full illustrated story.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(180_000);

/// Configuration for [`crate::gateway::HttpGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (`API_BASE_URL`, `API_TIMEOUT_MS`),
    /// reading `.env` if present. Unset or unparsable values keep the
    /// defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();

        if let Ok(url) = std::env::var("API_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(ms) = std::env::var("API_TIMEOUT_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                config.timeout = Duration::from_millis(ms);
            }
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_millis(180_000));
    }

    #[test]
    fn builders_override_defaults() {
        let config = GatewayConfig::new()
            .with_base_url("https://api.example.com")
            .with_timeout(Duration::from_secs(10));
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
