use rest_sketch::{
    Field, FieldCollection, FieldKind, Headers, LogLevel, Method, OutgoingRequest, Params,
    RequestDescriptor, Response, SendOptions, Session, StatusCode, Transport,
};
use std::collections::HashMap;
use std::error::Error;
use std::time::Duration;

// Typed params converted into a collection
struct SearchParams {
    query: String,
    page: Option<u32>,
}

impl FieldCollection for SearchParams {
    fn kind(&self) -> FieldKind {
        FieldKind::Param
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::required("q", self.query.clone()),
            Field::new("page", true, self.page.map(|p| p.to_string()).unwrap_or_default()),
        ]
    }
}

struct Search {
    params: SearchParams,
    token: String,
}

impl RequestDescriptor for Search {
    fn base_url(&self) -> &str {
        "https://api.example.com"
    }

    fn method(&self) -> Method {
        Method::GET
    }

    fn endpoint(&self) -> String {
        "/search".to_string()
    }

    fn params(&self) -> Option<Params> {
        Some(Params::from_collection(&self.params))
    }

    fn headers(&self) -> Option<Headers> {
        Some(Headers::new().field(Field::new("Authorization", false, self.token.clone())))
    }
}

// Answers every request locally instead of going to the network
struct EchoTransport;

impl Transport for EchoTransport {
    fn execute(&self, request: &OutgoingRequest) -> rest_sketch::Result<Response> {
        let body = format!(r#"{{"echo":"{}"}}"#, request.full_url()?);
        Ok(Response::builder(StatusCode::OK)
            .header("Content-Type", "application/json")?
            .text(&body)
            .build())
    }

    fn name(&self) -> &str {
        "echo"
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Advanced rest-sketch Features Demo ===\n");

    println!("=== Custom Transport ===");
    let session = Session::with_transport(EchoTransport).with_log_level(LogLevel::Debug);
    let search = Search {
        params: SearchParams {
            query: "rust".to_string(),
            page: Some(2),
        },
        token: "Bearer abc".to_string(),
    };
    let response = search.send_with(&session)?;
    println!("Echoed: {}", response.text());

    println!("\n=== Validation Errors ===");
    let unauthenticated = Search {
        params: SearchParams {
            query: "rust".to_string(),
            page: None,
        },
        token: String::new(),
    };
    match unauthenticated.to_raw_request() {
        Ok(_) => println!("Unexpected: request built"),
        Err(e) => println!("Expected schema error: {}", e),
    }

    println!("\n=== Proxies, TLS and Timeouts ===");
    let mut proxies = HashMap::new();
    proxies.insert("https", "http://localhost:3128");
    let options = SendOptions::new()
        .proxies(&proxies)?
        .verify(false)
        .timeout(Duration::from_millis(500))
        .log_level(LogLevel::Warning);
    println!("Options: {:?}", options);

    match search.send(&options) {
        Ok(response) => println!("Status: {}", response.status()),
        Err(e) => println!("Expected transport error without a proxy: {}", e),
    }

    println!("\n=== All advanced examples completed! ===");

    Ok(())
}
