use thiserror::Error;

use crate::field::FieldKind;

/// Result type for rest-sketch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rest-sketch
#[derive(Error, Debug)]
pub enum Error {
    /// A params or headers collection failed validation while flattening
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A structured body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any failure reported by the underlying HTTP client
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The flattened request could not be turned into a transport request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Proxy errors
    #[error("Proxy error: {0}")]
    Proxy(String),

    /// SSL/TLS errors
    #[error("SSL/TLS error: {0}")]
    Tls(String),

    /// Error status returned by the server, only raised on request
    #[error("HTTP status {status} {reason}")]
    Status {
        status: http::StatusCode,
        reason: String,
    },
}

impl Error {
    /// Create a new invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest(message.into())
    }

    /// Create a new proxy error
    pub fn proxy(message: impl Into<String>) -> Self {
        Error::Proxy(message.into())
    }

    /// Create a new TLS error
    pub fn tls(message: impl Into<String>) -> Self {
        Error::Tls(message.into())
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Error::Schema(_))
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Get the underlying schema error if this is one
    pub fn as_schema_error(&self) -> Option<&SchemaError> {
        match self {
            Error::Schema(e) => Some(e),
            _ => None,
        }
    }

    /// Get the underlying reqwest error if this is a transport error
    pub fn as_transport_error(&self) -> Option<&reqwest::Error> {
        match self {
            Error::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidRequest(format!("Invalid URL: {}", err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Error::InvalidRequest(format!("Invalid header name: {}", err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Error::InvalidRequest(format!("Invalid header value: {}", err))
    }
}

/// Validation failures raised when a field collection is flattened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A required field has no value
    #[error("{kind} '{key}' is not optional but has no value")]
    MissingRequired { kind: FieldKind, key: String },

    /// A field was declared without a key
    #[error("{kind} at position {position} has an empty key")]
    EmptyKey { kind: FieldKind, position: usize },
}

impl SchemaError {
    /// Create a missing required field error
    pub fn missing_required(kind: FieldKind, key: impl Into<String>) -> Self {
        SchemaError::MissingRequired {
            kind,
            key: key.into(),
        }
    }

    /// The kind of collection that failed
    pub fn kind(&self) -> FieldKind {
        match self {
            SchemaError::MissingRequired { kind, .. } => *kind,
            SchemaError::EmptyKey { kind, .. } => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message() {
        let err = SchemaError::missing_required(FieldKind::Param, "page");
        assert_eq!(err.to_string(), "Param 'page' is not optional but has no value");

        let err = SchemaError::EmptyKey {
            kind: FieldKind::Header,
            position: 2,
        };
        assert_eq!(err.to_string(), "Header at position 2 has an empty key");
    }

    #[test]
    fn test_error_conversions() {
        let err: Error = SchemaError::missing_required(FieldKind::Header, "x-token").into();
        assert!(err.is_schema());
        assert!(!err.is_transport());
        assert_eq!(err.as_schema_error().map(|e| e.kind()), Some(FieldKind::Header));

        let err: Error = "not a url".parse::<url::Url>().unwrap_err().into();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
