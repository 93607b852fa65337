//! Client configuration.

use std::time::Duration;

/// Configuration for a [`StorageClient`](crate::StorageClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account storage URL, e.g. `https://xxx.selcdn.ru/`. Container and
    /// object paths are appended below it.
    pub storage_url: String,
    /// Timeout applied to every HTTP call. There is no retry after a
    /// timeout; the caller observes the failure and may reissue.
    pub timeout: Duration,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // The conventional local Swift development endpoint.
            storage_url: "http://127.0.0.1:8080/v1/AUTH_test".to_owned(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("selstack/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `SELSTACK_STORAGE_URL`,
    /// `SELSTACK_TIMEOUT_SECS`, `SELSTACK_USER_AGENT`. Unset or malformed
    /// values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("SELSTACK_STORAGE_URL") {
            config.storage_url = v;
        }
        if let Ok(v) = std::env::var("SELSTACK_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse() {
                config.timeout = Duration::from_secs(secs);
            }
        }
        if let Ok(v) = std::env::var("SELSTACK_USER_AGENT") {
            config.user_agent = v;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.storage_url, "http://127.0.0.1:8080/v1/AUTH_test");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("selstack/"));
    }
}
