use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;
use crate::log_level::LogLevel;
use crate::proxy::ProxyConfig;
use crate::timeout::TimeoutConfig;
use crate::tls::TlsConfig;

/// Per-call settings for sending a request
///
/// # Examples
///
/// ```rust
/// use rest_sketch::{LogLevel, SendOptions};
/// use std::time::Duration;
///
/// let options = SendOptions::new()
///     .log_level(LogLevel::Debug)
///     .verify(false)
///     .timeout(Duration::from_secs(10));
/// assert_eq!(options.log_level, Some(LogLevel::Debug));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Level to dump the request and response at; `None` disables the dump
    pub log_level: Option<LogLevel>,
    /// Proxies to route through
    pub proxy: ProxyConfig,
    /// Certificate verification settings
    pub tls: TlsConfig,
    /// Timeouts passed to the client
    pub timeout: TimeoutConfig,
}

impl SendOptions {
    /// Create options with every setting left at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the proxy configuration
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = proxy;
        self
    }

    /// Set the proxies from a scheme to URL map
    pub fn proxies<K, V>(mut self, proxies: &HashMap<K, V>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.proxy = ProxyConfig::from_map(proxies)?;
        Ok(self)
    }

    /// Set the TLS configuration
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// Enable or disable certificate verification
    pub fn verify(mut self, verify: bool) -> Self {
        self.tls = self.tls.verify(verify);
        self
    }

    /// Set the overall request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = self.timeout.timeout(timeout);
        self
    }

    /// Set the timeout configuration
    pub fn timeout_config(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SendOptions::default();
        assert!(options.log_level.is_none());
        assert!(!options.proxy.has_proxy());
        assert!(options.tls.verify);
        assert!(!options.timeout.has_timeout());
    }

    #[test]
    fn test_options_builder() {
        let mut proxies = HashMap::new();
        proxies.insert("https".to_string(), "http://proxy.local:3128".to_string());

        let options = SendOptions::new()
            .log_level(LogLevel::Info)
            .proxies(&proxies)
            .unwrap()
            .verify(false)
            .timeout(Duration::from_secs(5));

        assert_eq!(options.log_level, Some(LogLevel::Info));
        assert!(options.proxy.https_proxy.is_some());
        assert!(!options.tls.verify);
        assert_eq!(options.timeout.timeout, Some(Duration::from_secs(5)));
    }
}
