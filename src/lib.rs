//! rest-sketch - declarative HTTP request descriptors
//!
//! Describe a request once as a plain Rust type, then render it, inspect it,
//! or send it. Every send can dump the request and the response to the log
//! in a readable form.
//!
//! ## Features
//!
//! - **Request descriptors** via the [`RequestDescriptor`] trait
//! - **Validated params and headers** with required/optional fields
//! - **Human-readable and cURL renderings** of requests
//! - **Request/response logging** through the `log` facade at a per-call level
//! - **Proxy, TLS verification and timeout** pass-through to `reqwest`
//! - **Pluggable transport** behind the [`Transport`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rest_sketch::{Headers, LogLevel, Method, Params, RequestDescriptor, SendOptions};
//!
//! struct GetUser {
//!     id: u64,
//! }
//!
//! impl RequestDescriptor for GetUser {
//!     fn base_url(&self) -> &str {
//!         "https://httpbin.org"
//!     }
//!
//!     fn method(&self) -> Method {
//!         Method::GET
//!     }
//!
//!     fn endpoint(&self) -> String {
//!         "/anything/users".to_string()
//!     }
//!
//!     fn params(&self) -> Option<Params> {
//!         Some(Params::new().required("id", self.id.to_string()))
//!     }
//!
//!     fn headers(&self) -> Option<Headers> {
//!         Some(Headers::new().required("Accept", "application/json"))
//!     }
//! }
//!
//! fn main() -> rest_sketch::Result<()> {
//!     let request = GetUser { id: 7 };
//!     println!("{}", request.to_curl_repr()?);
//!
//!     let response = request.send(&SendOptions::new().log_level(LogLevel::Info))?;
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod field;
pub mod format;
pub mod log_level;
pub mod options;
pub mod proxy;
pub mod request;
pub mod response;
pub mod session;
pub mod timeout;
pub mod tls;
pub mod transport;

// Re-export main types for convenience
pub use error::{Error, Result, SchemaError};
pub use field::{Field, FieldCollection, FieldKind, FieldMap, Header, Headers, Param, Params};
pub use format::{format_request, format_request_as_curl, format_response, is_json};
pub use log_level::{LogLevel, ParseLogLevelError};
pub use options::SendOptions;
pub use proxy::ProxyConfig;
pub use request::{Body, HumanRepr, RawRequest, RequestDescriptor};
pub use response::{Response, ResponseBuilder};
pub use session::{request, Session};
pub use timeout::TimeoutConfig;
pub use tls::TlsConfig;
pub use transport::{HttpTransport, OutgoingRequest, Transport};

// Re-export common HTTP types
pub use http::{HeaderMap, Method, StatusCode};

// Re-export JSON types
pub use serde_json::{Map as JsonMap, Value as JsonValue};
