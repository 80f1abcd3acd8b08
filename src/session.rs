use crate::error::Result;
use crate::format::{format_request, format_response};
use crate::log_level::LogLevel;
use crate::options::SendOptions;
use crate::response::Response;
use crate::transport::{HttpTransport, OutgoingRequest, Transport};

/// A transport wrapped with request/response logging
///
/// When a log level is set, every request is rendered with
/// [`format_request`] before it is handed to the transport and every response
/// with [`format_response`] after it comes back, both emitted through the
/// `log` facade at that level. The level belongs to this session only.
///
/// # Examples
///
/// ```rust,no_run
/// use rest_sketch::{LogLevel, Method, OutgoingRequest, Session};
///
/// fn main() -> rest_sketch::Result<()> {
///     let session = Session::new()?.with_log_level(LogLevel::Info);
///     let request = OutgoingRequest::new(Method::GET, "https://httpbin.org/get");
///     let response = session.request(&request)?;
///     println!("{}", response.status());
///     Ok(())
/// }
/// ```
pub struct Session<T: Transport = HttpTransport> {
    transport: T,
    log_level: Option<LogLevel>,
}

impl Session<HttpTransport> {
    /// Create a session over a default reqwest transport
    pub fn new() -> Result<Self> {
        Self::from_options(&SendOptions::default())
    }

    /// Create a session configured from send options
    pub fn from_options(options: &SendOptions) -> Result<Self> {
        let transport = HttpTransport::from_options(options)?;
        Ok(Self {
            transport,
            log_level: options.log_level,
        })
    }
}

impl<T: Transport> Session<T> {
    /// Create a session over a custom transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            log_level: None,
        }
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Change or clear the log level
    pub fn set_log_level(&mut self, level: Option<LogLevel>) {
        self.log_level = level;
    }

    /// Get the log level
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request, logging it and its response
    ///
    /// Transport errors are returned unchanged; no response is logged for them.
    pub fn request(&self, request: &OutgoingRequest) -> Result<Response> {
        if let Some(level) = self.log_level {
            log_request(request, level);
        }

        let response = self.transport.execute(request)?;

        if let Some(level) = self.log_level {
            log_response(&response, level);
        }
        Ok(response)
    }
}

/// Send one request through a fresh session built from `options`
///
/// The session and its client are dropped before this returns, whether or
/// not the call succeeded.
pub fn request(request: &OutgoingRequest, options: &SendOptions) -> Result<Response> {
    let session = Session::from_options(options)?;
    session.request(request)
}

fn log_request(request: &OutgoingRequest, level: LogLevel) {
    let level = level.as_log_level();
    if log::log_enabled!(level) {
        log::log!(level, "{}", format_request(request));
    }
}

fn log_response(response: &Response, level: LogLevel) {
    let level = level.as_log_level();
    if log::log_enabled!(level) {
        log::log!(level, "{}", format_response(response));
    }
}
