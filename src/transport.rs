use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use reqwest::blocking::Client as ReqwestClient;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};
use crate::field::FieldMap;
use crate::options::SendOptions;
use crate::response::Response;

/// A request as handed to a transport
///
/// `data` carries a pre-serialized body; `json` carries a structured one that
/// the transport serializes itself. When both are set, `data` is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,
    pub params: Option<FieldMap>,
    pub headers: Option<FieldMap>,
    pub data: Option<String>,
    pub json: Option<Value>,
}

impl OutgoingRequest {
    /// Create a request without params, headers or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: None,
            headers: None,
            data: None,
            json: None,
        }
    }

    /// Set the query parameters
    pub fn params(mut self, params: FieldMap) -> Self {
        self.params = Some(params);
        self
    }

    /// Set the headers
    pub fn headers(mut self, headers: FieldMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Set a pre-serialized body
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set a structured JSON body
    pub fn json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    /// The URL with the query parameters applied and percent-encoded
    pub fn full_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)?;
        if let Some(params) = self.params.as_ref().filter(|p| !p.is_empty()) {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }

    /// The headers as a typed header map
    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        if let Some(headers) = &self.headers {
            for (name, value) in headers.iter() {
                let name = name.parse::<HeaderName>()?;
                let value = value.parse::<HeaderValue>()?;
                map.insert(name, value);
            }
        }
        Ok(map)
    }
}

/// The HTTP client boundary
///
/// Anything that can execute an [`OutgoingRequest`] and return a
/// [`Response`] can back a session.
pub trait Transport {
    /// Send a request and return the response
    fn execute(&self, request: &OutgoingRequest) -> Result<Response>;

    /// Get the transport name
    fn name(&self) -> &str;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &OutgoingRequest) -> Result<Response> {
        (**self).execute(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &OutgoingRequest) -> Result<Response> {
        (**self).execute(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Default transport backed by a blocking reqwest client
pub struct HttpTransport {
    client: ReqwestClient,
}

impl HttpTransport {
    /// Create a transport with the client's default settings
    pub fn new() -> Result<Self> {
        Self::from_options(&SendOptions::default())
    }

    /// Create a transport honouring the proxy, TLS and timeout options
    pub fn from_options(options: &SendOptions) -> Result<Self> {
        let builder = ReqwestClient::builder();
        let builder = options.proxy.apply_to_builder(builder)?;
        let builder = options.tls.apply_to_builder(builder)?;
        let builder = options.timeout.apply_to_builder(builder);

        tracing::debug!(
            proxy = options.proxy.has_proxy(),
            verify = options.tls.verify,
            timeout = options.timeout.has_timeout(),
            "building http client"
        );

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: ReqwestClient) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn client(&self) -> &ReqwestClient {
        &self.client
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &OutgoingRequest) -> Result<Response> {
        let url = request.full_url()?;
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(request.header_map()?);

        if let Some(data) = &request.data {
            builder = builder.body(data.clone());
        } else if let Some(json) = &request.json {
            builder = builder.json(json);
        }

        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");

        let response = builder.send().map_err(Error::Transport)?;
        Response::from_reqwest_response(response)
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_encodes_params() {
        let params: FieldMap = vec![("q", "a b"), ("page", "2")].into_iter().collect();
        let request = OutgoingRequest::new(Method::GET, "http://localhost:8000/search").params(params);

        assert_eq!(
            request.full_url().unwrap().as_str(),
            "http://localhost:8000/search?q=a+b&page=2"
        );
    }

    #[test]
    fn test_full_url_invalid() {
        let request = OutgoingRequest::new(Method::GET, "/relative/only");
        assert!(matches!(request.full_url(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_header_map() {
        let headers: FieldMap = vec![("X-Trace", "1"), ("Accept", "text/plain")].into_iter().collect();
        let request = OutgoingRequest::new(Method::GET, "http://localhost/").headers(headers);

        let map = request.header_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("x-trace").unwrap(), "1");

        let bad: FieldMap = vec![("bad header", "1")].into_iter().collect();
        let request = OutgoingRequest::new(Method::GET, "http://localhost/").headers(bad);
        assert!(matches!(request.header_map(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_http_transport_name() {
        let transport = HttpTransport::new().unwrap();
        assert_eq!(transport.name(), "reqwest");
    }
}
