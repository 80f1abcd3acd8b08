use rest_sketch::{
    Body, Headers, HumanRepr, LogLevel, Method, Params, RequestDescriptor, SendOptions,
};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Payload {
    name: String,
    version: String,
    language: String,
}

struct PostPayload {
    base_url: String,
    trace_id: Option<String>,
}

impl RequestDescriptor for PostPayload {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> String {
        "/post".to_string()
    }

    fn params(&self) -> Option<Params> {
        Some(Params::new().required("source", "demo").optional("debug"))
    }

    fn headers(&self) -> Option<Headers> {
        Some(
            Headers::new()
                .required("Content-Type", "application/json")
                .optional_value("X-Trace-Id", self.trace_id.clone().unwrap_or_default()),
        )
    }

    fn body(&self) -> rest_sketch::Result<Option<Body>> {
        let payload = Payload {
            name: "rest-sketch".to_string(),
            version: "0.1.0".to_string(),
            language: "rust".to_string(),
        };
        Ok(Some(Body::json(&payload)?))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Route `log` records to stdout
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let request = PostPayload {
        base_url: "https://httpbin.org".to_string(),
        trace_id: Some("demo-1".to_string()),
    };

    println!("=== Human-readable form ===");
    println!("{}", HumanRepr(&request));

    println!("\n=== cURL form ===");
    println!("{}", request.to_curl_repr()?);

    println!("\n=== Raw request ===");
    println!("{:#?}", request.to_raw_request()?);

    println!("\n=== Send with logging ===");
    let response = request.send(&SendOptions::new().log_level(LogLevel::Info))?;
    println!("Status: {}", response.status());
    println!("Body length: {} bytes", response.text().len());

    println!("\n=== All examples completed successfully! ===");

    Ok(())
}
