use std::path::PathBuf;

use reqwest::blocking::ClientBuilder;
use reqwest::Certificate;

use crate::error::{Error, Result};

/// TLS settings for a send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Whether to verify the server certificate
    pub verify: bool,
    /// Extra CA certificate (PEM) to trust
    pub ca_cert_path: Option<PathBuf>,
}

impl TlsConfig {
    /// Create a new TLS configuration that verifies certificates
    pub fn new() -> Self {
        Self {
            verify: true,
            ca_cert_path: None,
        }
    }

    /// Create a TLS configuration that accepts invalid certificates
    pub fn insecure() -> Self {
        Self::new().verify(false)
    }

    /// Set certificate verification
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Set CA certificate path
    pub fn ca_cert_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_path = Some(path.into());
        self
    }

    /// Check if certificate verification is enabled
    pub fn is_verify_enabled(&self) -> bool {
        self.verify
    }

    /// Apply this configuration to a reqwest client builder
    pub fn apply_to_builder(&self, mut builder: ClientBuilder) -> Result<ClientBuilder> {
        if let Some(ca_path) = &self.ca_cert_path {
            let cert_data = std::fs::read(ca_path).map_err(|e| {
                Error::tls(format!("Failed to read CA certificate {}: {}", ca_path.display(), e))
            })?;
            let cert = Certificate::from_pem(&cert_data)
                .map_err(|e| Error::tls(format!("Invalid CA certificate: {}", e)))?;
            builder = builder.add_root_certificate(cert);
        }

        if !self.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder)
    }
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<bool> for TlsConfig {
    fn from(verify: bool) -> Self {
        Self::new().verify(verify)
    }
}
