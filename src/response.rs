use http::{HeaderMap, HeaderValue, StatusCode};
use url::Url;

use crate::error::{Error, Result};

/// HTTP response received by a session
///
/// The body is read eagerly so that the session can log it and still hand
/// it back unchanged.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    reason: String,
    headers: HeaderMap,
    url: Option<Url>,
    text: String,
}

impl Response {
    /// Create a response from a blocking reqwest response, reading its body
    ///
    /// The blocking client does not hand back the status line's reason
    /// phrase, so the canonical phrase for the status is used instead.
    pub fn from_reqwest_response(response: reqwest::blocking::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let text = response.text()?;

        Ok(Self {
            status,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            url: Some(url),
            text,
        })
    }

    /// Create a response builder
    pub fn builder(status: StatusCode) -> ResponseBuilder {
        ResponseBuilder::new(status)
    }

    /// Get the HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the reason phrase
    ///
    /// Empty when the status has no registered phrase, unless one was set
    /// through [`ResponseBuilder::reason`].
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Get the response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a specific header value
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    /// Get the content type
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Get the URL the response came from, if known
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Get the response body as text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take the response body
    pub fn into_text(self) -> String {
        self.text
    }

    /// Deserialize the response body as JSON
    pub fn json<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if the response is successful (2xx status code)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response is a client error (4xx status code)
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check if the response is a server error (5xx status code)
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Turn 4xx and 5xx responses into an error
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_client_error() || self.status.is_server_error() {
            return Err(Error::Status {
                status: self.status,
                reason: self.reason,
            });
        }
        Ok(self)
    }
}

/// Builder for responses that did not come off the wire
///
/// Used by custom transports and tests.
pub struct ResponseBuilder {
    status: StatusCode,
    reason: Option<String>,
    headers: HeaderMap,
    url: Option<Url>,
    text: String,
}

impl ResponseBuilder {
    /// Create a new response builder
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            reason: None,
            headers: HeaderMap::new(),
            url: None,
            text: String::new(),
        }
    }

    /// Override the reason phrase, which defaults to the canonical one
    pub fn reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    /// Set the headers
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set a header
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = name.parse::<http::header::HeaderName>()?;
        let value = value.parse::<HeaderValue>()?;
        self.headers.append(name, value);
        Ok(self)
    }

    /// Set the URL
    pub fn url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Set text body
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Build the response
    pub fn build(self) -> Response {
        let reason = self
            .reason
            .unwrap_or_else(|| self.status.canonical_reason().unwrap_or_default().to_string());

        Response {
            status: self.status,
            reason,
            headers: self.headers,
            url: self.url,
            text: self.text,
        }
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}
