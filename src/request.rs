//! Declarative request descriptors.
//!
//! A request type implements [`RequestDescriptor`] by answering a handful of
//! questions (method, endpoint, params, headers, body). Everything else is
//! derived: a human-readable dump, a cURL command, the flattened
//! [`RawRequest`], and sending it.
//!
//! ```rust
//! use rest_sketch::{Body, Headers, Method, Params, RequestDescriptor};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct NewItem {
//!     name: String,
//! }
//!
//! struct CreateItem {
//!     base_url: String,
//!     name: String,
//! }
//!
//! impl RequestDescriptor for CreateItem {
//!     fn base_url(&self) -> &str {
//!         &self.base_url
//!     }
//!
//!     fn method(&self) -> Method {
//!         Method::POST
//!     }
//!
//!     fn endpoint(&self) -> String {
//!         "/items".to_string()
//!     }
//!
//!     fn params(&self) -> Option<Params> {
//!         Some(Params::new().optional("dry_run"))
//!     }
//!
//!     fn headers(&self) -> Option<Headers> {
//!         Some(Headers::new().required("Content-Type", "application/json"))
//!     }
//!
//!     fn body(&self) -> rest_sketch::Result<Option<Body>> {
//!         Ok(Some(Body::json(&NewItem { name: self.name.clone() })?))
//!     }
//! }
//!
//! let request = CreateItem {
//!     base_url: "http://localhost:8000".to_string(),
//!     name: "widget".to_string(),
//! };
//! assert_eq!(
//!     request.to_curl_repr().unwrap(),
//!     r#"curl -X POST http://localhost:8000/items -H "Content-Type: application/json" -d '{"name":"widget"}'"#
//! );
//! ```

use std::fmt;

use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::field::{FieldCollection, FieldMap, Headers, Params};
use crate::options::SendOptions;
use crate::response::Response;
use crate::session::{self, Session};
use crate::transport::{OutgoingRequest, Transport};

/// Body of a request descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Structured body, sent as compact JSON
    Json(Value),
    /// Body sent verbatim
    Text(String),
}

impl Body {
    /// Serialize a value into a structured body
    pub fn json<T>(value: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        Ok(Body::Json(serde_json::to_value(value)?))
    }

    /// Create a verbatim body
    pub fn text(text: impl Into<String>) -> Self {
        Body::Text(text.into())
    }

    /// Check if the body would be sent as an empty string
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Text(text) if text.is_empty())
    }

    /// The string that goes on the wire
    pub fn to_body_string(&self) -> Result<String> {
        match self {
            Body::Json(value) => Ok(serde_json::to_string(value)?),
            Body::Text(text) => Ok(text.clone()),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

/// A reusable, declarative definition of one HTTP request
///
/// Accessors are called afresh by every derived operation, so they should be
/// cheap and free of side effects. Flattening errors from
/// [`params`](RequestDescriptor::params) and
/// [`headers`](RequestDescriptor::headers) stop the request before anything is
/// sent.
pub trait RequestDescriptor {
    /// Scheme, host and optional path prefix, without a trailing slash
    fn base_url(&self) -> &str;

    /// HTTP method
    fn method(&self) -> Method;

    /// Path appended to the base URL
    fn endpoint(&self) -> String;

    /// Query parameters
    fn params(&self) -> Option<Params> {
        None
    }

    /// Request headers
    fn headers(&self) -> Option<Headers> {
        None
    }

    /// Request body
    ///
    /// A JSON `null` body is treated the same as no body.
    fn body(&self) -> Result<Option<Body>> {
        Ok(None)
    }

    /// Base URL joined with the endpoint
    fn url(&self) -> String {
        format!("{}{}", self.base_url(), self.endpoint())
    }

    /// Render as `METHOD url?params`, header lines, a blank line and the body
    fn to_human_repr(&self) -> Result<String> {
        let mut out = format!("{} {}", self.method(), self.url());
        if let Some(params) = flatten(self.params())? {
            out.push('?');
            out.push_str(&params.to_query_string());
        }
        if let Some(headers) = flatten(self.headers())? {
            for (key, value) in headers.iter() {
                out.push_str(&format!("\n{}: {}", key, value));
            }
        }
        if let Some(body) = present_body(self)?.filter(|b| !b.is_empty()) {
            out.push_str("\n\n");
            out.push_str(&body.to_body_string()?);
        }
        Ok(out)
    }

    /// Render as a cURL command
    fn to_curl_repr(&self) -> Result<String> {
        let mut out = format!("curl -X {} {}", self.method(), self.url());
        if let Some(params) = flatten(self.params())? {
            out.push('?');
            out.push_str(&params.to_query_string());
        }
        if let Some(headers) = flatten(self.headers())? {
            for (key, value) in headers.iter() {
                out.push_str(&format!(" -H \"{}: {}\"", key, value));
            }
        }
        if let Some(body) = present_body(self)?.filter(|b| !b.is_empty()) {
            out.push_str(&format!(" -d '{}'", body.to_body_string()?));
        }
        Ok(out)
    }

    /// Flatten into a transport-ready request
    fn to_raw_request(&self) -> Result<RawRequest> {
        let params = self.params().map(|p| p.to_map()).transpose()?;
        let headers = self.headers().map(|h| h.to_map()).transpose()?;
        let body = present_body(self)?
            .map(|b| b.to_body_string())
            .transpose()?;

        Ok(RawRequest {
            method: self.method(),
            url: self.url(),
            params,
            headers,
            body,
        })
    }

    /// Flatten and send through a fresh session built from `options`
    fn send(&self, options: &SendOptions) -> Result<Response> {
        self.to_raw_request()?.send(options)
    }

    /// Flatten and send through an existing session
    fn send_with<T>(&self, session: &Session<T>) -> Result<Response>
    where
        Self: Sized,
        T: Transport,
    {
        self.to_raw_request()?.send_with(session)
    }
}

/// `Display` adapter printing a descriptor's human-readable form
pub struct HumanRepr<'a, R: ?Sized>(pub &'a R);

impl<R: RequestDescriptor + ?Sized> fmt::Display for HumanRepr<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.to_human_repr() {
            Ok(repr) => f.write_str(&repr),
            Err(e) => write!(f, "<invalid request: {}>", e),
        }
    }
}

fn present_body<R: RequestDescriptor + ?Sized>(request: &R) -> Result<Option<Body>> {
    Ok(request
        .body()?
        .filter(|body| !matches!(body, Body::Json(Value::Null))))
}

fn flatten<C: FieldCollection>(collection: Option<C>) -> Result<Option<FieldMap>> {
    match collection {
        Some(collection) => {
            let map = collection.to_map()?;
            Ok(Some(map).filter(|m| !m.is_empty()))
        }
        None => Ok(None),
    }
}

/// A fully flattened request, ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: Method,
    pub url: String,
    pub params: Option<FieldMap>,
    pub headers: Option<FieldMap>,
    pub body: Option<String>,
}

impl RawRequest {
    /// Create a raw request without params, headers or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: None,
            headers: None,
            body: None,
        }
    }

    /// Convert into the transport's request shape
    pub fn to_outgoing(&self) -> OutgoingRequest {
        OutgoingRequest {
            method: self.method.clone(),
            url: self.url.clone(),
            params: self.params.clone(),
            headers: self.headers.clone(),
            data: self.body.clone(),
            json: None,
        }
    }

    /// Send through a fresh session built from `options`
    pub fn send(&self, options: &SendOptions) -> Result<Response> {
        session::request(&self.to_outgoing(), options)
    }

    /// Send through an existing session
    pub fn send_with<T: Transport>(&self, session: &Session<T>) -> Result<Response> {
        session.request(&self.to_outgoing())
    }
}

impl From<RawRequest> for OutgoingRequest {
    fn from(raw: RawRequest) -> Self {
        OutgoingRequest {
            method: raw.method,
            url: raw.url,
            params: raw.params,
            headers: raw.headers,
            data: raw.body,
            json: None,
        }
    }
}
