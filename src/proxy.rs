use std::collections::HashMap;

use reqwest::blocking::ClientBuilder;
use reqwest::Proxy as ReqwestProxy;
use url::Url;

use crate::error::{Error, Result};

/// Proxy configuration for a send
///
/// Mirrors the familiar `{"http": ..., "https": ...}` proxy map: one proxy per
/// scheme plus an optional catch-all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy for `http://` URLs
    pub http_proxy: Option<Url>,
    /// Proxy for `https://` URLs
    pub https_proxy: Option<Url>,
    /// Proxy for every URL
    pub all_proxy: Option<Url>,
}

impl ProxyConfig {
    /// Create an empty proxy configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from a scheme to proxy URL map
    ///
    /// Recognised keys are `http`, `https` and `all`.
    pub fn from_map<K, V>(proxies: &HashMap<K, V>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::new();
        for (scheme, url) in proxies {
            let url = parse_proxy_url(url.as_ref())?;
            match scheme.as_ref() {
                "http" => config.http_proxy = Some(url),
                "https" => config.https_proxy = Some(url),
                "all" => config.all_proxy = Some(url),
                other => return Err(Error::proxy(format!("Unsupported proxy scheme: {}", other))),
            }
        }
        Ok(config)
    }

    /// Set HTTP proxy
    pub fn http_proxy(mut self, url: Url) -> Self {
        self.http_proxy = Some(url);
        self
    }

    /// Set HTTPS proxy
    pub fn https_proxy(mut self, url: Url) -> Self {
        self.https_proxy = Some(url);
        self
    }

    /// Set a proxy for every scheme
    pub fn proxy(mut self, url: Url) -> Self {
        self.all_proxy = Some(url);
        self
    }

    /// Check if any proxy is configured
    pub fn has_proxy(&self) -> bool {
        self.http_proxy.is_some() || self.https_proxy.is_some() || self.all_proxy.is_some()
    }

    /// Apply this configuration to a reqwest client builder
    pub fn apply_to_builder(&self, mut builder: ClientBuilder) -> Result<ClientBuilder> {
        if let Some(url) = &self.http_proxy {
            builder = builder.proxy(ReqwestProxy::http(url.as_str()).map_err(proxy_error)?);
        }
        if let Some(url) = &self.https_proxy {
            builder = builder.proxy(ReqwestProxy::https(url.as_str()).map_err(proxy_error)?);
        }
        if let Some(url) = &self.all_proxy {
            builder = builder.proxy(ReqwestProxy::all(url.as_str()).map_err(proxy_error)?);
        }
        Ok(builder)
    }
}

fn parse_proxy_url(url: &str) -> Result<Url> {
    url.parse::<Url>()
        .map_err(|e| Error::proxy(format!("Invalid proxy URL '{}': {}", url, e)))
}

fn proxy_error(err: reqwest::Error) -> Error {
    Error::proxy(err.to_string())
}
