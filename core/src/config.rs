//! Client configuration.

use std::time::Duration;

/// Production endpoint of the API.
pub const DEFAULT_ENDPOINT: &str = "https://api.linode.com/";

/// Settings used to construct a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL every request is POSTed to.
    pub endpoint: String,
    /// Upper bound on one whole exchange. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "https://api.linode.com/");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn with_timeout_sets_bound() {
        let config = ClientConfig::new("http://localhost:3000/").with_timeout(Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://localhost:3000/");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
