use std::time::Duration;

use reqwest::blocking::ClientBuilder;

/// Timeouts passed through to the HTTP client
///
/// Nothing is enforced by this crate itself; unset values leave the client's
/// own defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Overall request timeout
    pub timeout: Option<Duration>,
    /// Connection establishment timeout
    pub connect_timeout: Option<Duration>,
}

impl TimeoutConfig {
    /// Create a new timeout configuration with an overall timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            connect_timeout: None,
        }
    }

    /// Set the overall request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Check if any timeout is configured
    pub fn has_timeout(&self) -> bool {
        self.timeout.is_some() || self.connect_timeout.is_some()
    }

    /// Apply this configuration to a reqwest client builder
    pub fn apply_to_builder(&self, mut builder: ClientBuilder) -> ClientBuilder {
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_config_creation() {
        let config = TimeoutConfig::new(Duration::from_secs(30));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.has_timeout());
        assert!(!TimeoutConfig::default().has_timeout());
    }

    #[test]
    fn test_apply_to_builder() {
        let config = TimeoutConfig::default().connect_timeout(Duration::from_secs(5));
        assert!(config.has_timeout());
        assert!(config.apply_to_builder(reqwest::blocking::Client::builder()).build().is_ok());
    }
}
