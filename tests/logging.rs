//! Request/response logging through a session.
//!
//! A capturing `log::Log` records everything; each test filters on a URL
//! unique to it so tests can run in parallel.

use std::sync::{Mutex, Once};

use rest_sketch::{
    Error, Headers, LogLevel, Method, OutgoingRequest, Params, RequestDescriptor, Response,
    Session, StatusCode, Transport,
};

static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

fn init_logger() {
    INIT.call_once(|| {
        log::set_logger(&CaptureLogger).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

fn records_containing(marker: &str) -> Vec<(log::Level, String)> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, message)| message.contains(marker))
        .cloned()
        .collect()
}

fn records_equal_to(message: &str) -> Vec<log::Level> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, m)| m == message)
        .map(|(level, _)| *level)
        .collect()
}

struct JsonTransport {
    body: &'static str,
}

impl Transport for JsonTransport {
    fn execute(&self, _request: &OutgoingRequest) -> rest_sketch::Result<Response> {
        Ok(Response::builder(StatusCode::OK)
            .header("X-Served-By", "stub")?
            .text(self.body)
            .build())
    }

    fn name(&self) -> &str {
        "json"
    }
}

struct FailingTransport;

impl Transport for FailingTransport {
    fn execute(&self, _request: &OutgoingRequest) -> rest_sketch::Result<Response> {
        Err(Error::invalid_request("connection refused"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct Ping {
    marker: &'static str,
}

impl RequestDescriptor for Ping {
    fn base_url(&self) -> &str {
        "http://logging.test"
    }

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> String {
        format!("/{}", self.marker)
    }

    fn params(&self) -> Option<Params> {
        Some(Params::new().required("attempt", "1"))
    }

    fn headers(&self) -> Option<Headers> {
        Some(Headers::new().required("X-Client", "tests"))
    }

    fn body(&self) -> rest_sketch::Result<Option<rest_sketch::Body>> {
        Ok(Some("ping".into()))
    }
}

#[test]
fn logs_request_and_response_at_configured_level() {
    init_logger();
    let session = Session::with_transport(JsonTransport {
        body: r#"{"marker":"resp-info-7f3a"}"#,
    })
    .with_log_level(LogLevel::Info);

    let response = Ping { marker: "req-info-7f3a" }.send_with(&session).unwrap();
    assert_eq!(response.text(), r#"{"marker":"resp-info-7f3a"}"#);

    let requests = records_containing("req-info-7f3a");
    assert_eq!(
        requests,
        vec![(
            log::Level::Info,
            "POST http://logging.test/req-info-7f3a?attempt=1\nX-Client: tests\nping".to_string()
        )]
    );

    let responses = records_containing("resp-info-7f3a");
    assert_eq!(
        responses,
        vec![(
            log::Level::Info,
            "200 OK\nx-served-by: stub\n{\n    \"marker\": \"resp-info-7f3a\"\n}".to_string()
        )]
    );
}

#[test]
fn logs_nothing_without_level() {
    init_logger();
    let session = Session::with_transport(JsonTransport {
        body: r#"{"marker":"resp-quiet-91c2"}"#,
    });

    Ping { marker: "req-quiet-91c2" }.send_with(&session).unwrap();

    assert!(records_containing("req-quiet-91c2").is_empty());
    assert!(records_containing("resp-quiet-91c2").is_empty());
}

#[test]
fn critical_maps_to_error_level() {
    init_logger();
    let session = Session::with_transport(JsonTransport { body: "" })
        .with_log_level(LogLevel::Critical);

    let request = OutgoingRequest::new(Method::DELETE, "http://logging.test/req-critical-55d0");
    let response = session.request(&request).unwrap();
    assert_eq!(response.text(), "");

    assert_eq!(
        records_containing("req-critical-55d0"),
        vec![(
            log::Level::Error,
            "DELETE http://logging.test/req-critical-55d0".to_string()
        )]
    );
    assert!(records_equal_to("200 OK\nx-served-by: stub").contains(&log::Level::Error));
}

#[test]
fn transport_error_logs_only_the_request() {
    init_logger();
    let session = Session::with_transport(FailingTransport).with_log_level(LogLevel::Warning);

    let result = Ping { marker: "req-fail-0b6e" }.send_with(&session);
    assert!(matches!(result, Err(Error::InvalidRequest(_))));

    let requests = records_containing("req-fail-0b6e");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, log::Level::Warn);
}

#[test]
fn log_level_is_scoped_to_the_session() {
    init_logger();
    let loud = Session::with_transport(JsonTransport { body: "loud-3e8d" })
        .with_log_level(LogLevel::Debug);
    let quiet = Session::with_transport(JsonTransport { body: "quiet-3e8d" });

    Ping { marker: "req-loud-3e8d" }.send_with(&loud).unwrap();
    Ping { marker: "req-quiet-3e8d" }.send_with(&quiet).unwrap();

    assert_eq!(records_containing("req-loud-3e8d").len(), 1);
    assert_eq!(records_containing("loud-3e8d").len(), 2);
    assert!(records_containing("req-quiet-3e8d").is_empty());
    assert!(records_containing("quiet-3e8d").is_empty());
}
