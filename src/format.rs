//! Human-readable and cURL renderings of requests and responses.
//!
//! These are the strings a [`Session`](crate::Session) writes to the log.
//! Request rendering:
//!
//! ```text
//! POST http://example.com/items?page=1
//! Content-Type: application/json
//! {
//!     "key": "value"
//! }
//! ```
//!
//! Response rendering:
//!
//! ```text
//! 200 OK
//! content-type: application/json
//! {
//!     "id": 7
//! }
//! ```

use http::HeaderMap;
use serde::Serialize;
use serde_json::Value;

use crate::field::FieldMap;
use crate::response::Response;
use crate::transport::OutgoingRequest;

/// Check whether a string is a complete JSON document
pub fn is_json(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok()
}

/// Pretty-print a JSON value with four-space indentation
pub fn pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

/// Render a request as `METHOD url?params`, header lines, then the body
///
/// A structured `json` body is pretty-printed; otherwise `data` is written as
/// is. Without a body the section is left out.
pub fn format_request(request: &OutgoingRequest) -> String {
    let mut out = format!("{} {}", request.method, request.url);
    if let Some(params) = non_empty(&request.params) {
        out.push('?');
        out.push_str(&params.to_query_string());
    }
    if let Some(headers) = non_empty(&request.headers) {
        out.push('\n');
        out.push_str(&header_lines(headers.iter()));
    }
    if let Some(json) = &request.json {
        out.push('\n');
        out.push_str(&pretty_json(json));
    } else if let Some(data) = &request.data {
        out.push('\n');
        out.push_str(data);
    }
    out
}

/// Render a response as `status reason`, header lines, then the body
///
/// A JSON body is pretty-printed, anything else is written as is, and an
/// empty body is left out.
pub fn format_response(response: &Response) -> String {
    let mut out = format!("{} {}", response.status().as_u16(), response.reason());
    if !response.headers().is_empty() {
        out.push('\n');
        out.push_str(&response_header_lines(response.headers()));
    }
    let text = response.text();
    if !text.is_empty() {
        out.push('\n');
        match serde_json::from_str::<Value>(text) {
            Ok(value) => out.push_str(&pretty_json(&value)),
            Err(_) => out.push_str(text),
        }
    }
    out
}

/// Render a request as a cURL command
///
/// ```text
/// curl -X POST -H "Content-Type: application/json" -d '{"key":"value"}' http://example.com
/// ```
pub fn format_request_as_curl(request: &OutgoingRequest) -> String {
    let mut out = format!("curl -X {}", request.method);
    if let Some(headers) = non_empty(&request.headers) {
        for (key, value) in headers.iter() {
            out.push_str(&format!(" -H \"{}: {}\"", key, value));
        }
    }
    let data = match (&request.data, &request.json) {
        (Some(data), _) => Some(data.clone()),
        (None, Some(json)) => Some(json.to_string()),
        (None, None) => None,
    };
    if let Some(data) = data.filter(|d| !d.is_empty()) {
        out.push_str(&format!(" -d '{}'", data));
    }
    out.push(' ');
    out.push_str(&request.url);
    if let Some(params) = non_empty(&request.params) {
        out.push('?');
        out.push_str(&params.to_query_string());
    }
    out
}

fn non_empty(map: &Option<FieldMap>) -> Option<&FieldMap> {
    map.as_ref().filter(|m| !m.is_empty())
}

fn header_lines<'a>(headers: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    headers
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn response_header_lines(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes())))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};
    use serde_json::json;

    fn map(entries: &[(&str, &str)]) -> FieldMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(r#"{"a": 1}"#));
        assert!(is_json("[1, 2, 3]"));
        assert!(is_json("42"));
        assert!(!is_json("{'a': 1}"));
        assert!(!is_json("plain text"));
        assert!(!is_json(""));
    }

    #[test]
    fn test_pretty_json_keeps_key_order() {
        let value = json!({"zeta": 1, "alpha": [true, null]});
        assert_eq!(
            pretty_json(&value),
            "{\n    \"zeta\": 1,\n    \"alpha\": [\n        true,\n        null\n    ]\n}"
        );
    }

    #[test]
    fn test_format_request_with_data() {
        let request = OutgoingRequest::new(Method::POST, "http://localhost:8000/items")
            .params(map(&[("page", "1"), ("size", "20")]))
            .headers(map(&[("Content-Type", "text/plain"), ("X-Id", "9")]))
            .data("hello");

        assert_eq!(
            format_request(&request),
            "POST http://localhost:8000/items?page=1&size=20\nContent-Type: text/plain\nX-Id: 9\nhello"
        );
    }

    #[test]
    fn test_format_request_with_json() {
        let request = OutgoingRequest::new(Method::PUT, "http://localhost/items/1")
            .json(json!({"name": "widget"}));

        assert_eq!(
            format_request(&request),
            "PUT http://localhost/items/1\n{\n    \"name\": \"widget\"\n}"
        );
    }

    #[test]
    fn test_format_request_without_body() {
        let request = OutgoingRequest::new(Method::GET, "http://localhost/health")
            .params(FieldMap::new());
        assert_eq!(format_request(&request), "GET http://localhost/health");
    }

    #[test]
    fn test_format_response_json() {
        let response = Response::builder(StatusCode::OK).text("{\"a\":1}").build();
        assert_eq!(format_response(&response), "200 OK\n{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_format_response_text_and_headers() {
        let response = Response::builder(StatusCode::NOT_FOUND)
            .header("Content-Type", "text/plain")
            .unwrap()
            .text("nothing here")
            .build();
        assert_eq!(
            format_response(&response),
            "404 Not Found\ncontent-type: text/plain\nnothing here"
        );
    }

    #[test]
    fn test_format_response_custom_reason() {
        let response = Response::builder(StatusCode::from_u16(599).unwrap())
            .reason("Network Timeout")
            .build();
        assert_eq!(format_response(&response), "599 Network Timeout");
    }

    #[test]
    fn test_format_response_empty_body() {
        let response = Response::builder(StatusCode::NO_CONTENT).build();
        assert_eq!(format_response(&response), "204 No Content");
    }

    #[test]
    fn test_format_response_round_trips_json() {
        let body = r#"{"items":[{"id":1,"tags":["a","b"]}],"total":1.5,"next":null}"#;
        let response = Response::builder(StatusCode::OK).text(body).build();
        let rendered = format_response(&response);
        let pretty = rendered.strip_prefix("200 OK\n").unwrap();

        let original: Value = serde_json::from_str(body).unwrap();
        let parsed: Value = serde_json::from_str(pretty).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_format_response_keeps_large_integers_exact() {
        let body = r#"{"id":12345678901234567890123,"ratio":0.10000000000000000001}"#;
        let response = Response::builder(StatusCode::OK).text(body).build();
        assert_eq!(
            format_response(&response),
            "200 OK\n{\n    \"id\": 12345678901234567890123,\n    \"ratio\": 0.10000000000000000001\n}"
        );
    }

    #[test]
    fn test_format_request_as_curl() {
        let request = OutgoingRequest::new(Method::POST, "http://localhost:8000/items")
            .params(map(&[("dry_run", "true")]))
            .headers(map(&[("Content-Type", "application/json")]))
            .data(r#"{"key":"value"}"#);

        assert_eq!(
            format_request_as_curl(&request),
            r#"curl -X POST -H "Content-Type: application/json" -d '{"key":"value"}' http://localhost:8000/items?dry_run=true"#
        );
    }

    #[test]
    fn test_format_request_as_curl_json_fallback() {
        let request = OutgoingRequest::new(Method::PATCH, "http://localhost/items/2")
            .json(json!({"done": true}));
        assert_eq!(
            format_request_as_curl(&request),
            r#"curl -X PATCH -d '{"done":true}' http://localhost/items/2"#
        );

        let request = OutgoingRequest::new(Method::DELETE, "http://localhost/items/2").data("");
        assert_eq!(format_request_as_curl(&request), "curl -X DELETE http://localhost/items/2");
    }
}
