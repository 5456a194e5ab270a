//! End-to-end tests for `NetworkClient` over in-memory transports.
//!
//! # Test Strategy
//!
//! 1. **Happy path**: GET and POST decode into the requested shape
//! 2. **Classified failures**: bad request, status codes, decoding
//! 3. **Transport faults**: carried through unchanged
//! 4. **Independence**: concurrent calls never observe each other

use std::sync::Mutex;

use async_trait::async_trait;
use network::{
    DecodeFailure, Endpoint, HttpMethod, HttpTransport, NetworkClient, NetworkError,
    RequestError, ResourceAddress, ResourceDescriptor, StructuredDecoder, TransportRequest,
    TransportResponse,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, PartialEq, Deserialize)]
struct Item {
    id: u64,
    name: String,
}

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
struct Refused;

/// Replies with a fixed status and body and remembers what it was sent.
struct StubTransport {
    status: u16,
    body: Vec<u8>,
    sent: Mutex<Vec<TransportRequest>>,
}

impl StubTransport {
    fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.as_bytes().to_vec(),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<TransportRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    type Error = Refused;

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, Refused> {
        self.sent.lock().unwrap().push(request);
        Ok(TransportResponse::new(self.status, self.body.clone()))
    }
}

/// Fails every send.
struct RefusingTransport;

#[async_trait]
impl HttpTransport for RefusingTransport {
    type Error = Refused;

    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, Refused> {
        Err(Refused)
    }
}

/// Echoes the request address back as the `name` of an `Item`.
struct EchoTransport;

#[async_trait]
impl HttpTransport for EchoTransport {
    type Error = Refused;

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, Refused> {
        tokio::task::yield_now().await;
        let body = serde_json::json!({ "id": 1, "name": request.address().as_str() });
        Ok(TransportResponse::new(200, body.to_string()))
    }
}

struct Unaddressable(HttpMethod);

impl ResourceDescriptor for Unaddressable {
    fn address(&self) -> Option<ResourceAddress> {
        None
    }

    fn method(&self) -> &HttpMethod {
        &self.0
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("network=debug")
        .with_test_writer()
        .try_init();
}

fn items() -> Endpoint {
    Endpoint::get("api.example.com", "/items/7")
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_get_decodes_body_into_shape() {
    init_tracing();
    let transport = StubTransport::new(200, r#"{"id": 7, "name": "a"}"#);

    let item: Item = NetworkClient::new().request(&transport, &items()).await.unwrap();

    assert_eq!(
        item,
        Item {
            id: 7,
            name: "a".into()
        }
    );
    let sent = transport.sent();
    assert_eq!(sent.len(), 1, "exactly one send per call");
    assert_eq!(sent[0].method(), "GET");
    assert_eq!(sent[0].address().as_str(), "https://api.example.com/items/7");
    assert_eq!(sent[0].body(), None);
}

#[tokio::test]
async fn test_post_sends_payload_unchanged() {
    let transport = StubTransport::new(201, r#"{"id": 8, "name": "b"}"#);
    let payload = br#"{"name":"b"}"#.to_vec();
    let endpoint = Endpoint::post("api.example.com", "/items", Some(payload.clone()));

    let item: Item = NetworkClient::new().request(&transport, &endpoint).await.unwrap();

    assert_eq!(item.id, 8);
    let sent = transport.sent();
    assert_eq!(sent[0].method(), "POST");
    assert_eq!(sent[0].body(), Some(payload.as_slice()));
}

#[tokio::test]
async fn test_status_300_is_accepted() {
    // The success interval is closed at 300.
    let transport = StubTransport::new(300, r#"{"id": 1, "name": "x"}"#);
    let result: Result<Item, _> = NetworkClient::new().request(&transport, &items()).await;
    assert!(result.is_ok());
}

// ============================================================================
// Classified failures
// ============================================================================

#[tokio::test]
async fn test_missing_address_fails_before_sending() {
    let transport = StubTransport::new(200, r#"{"id": 1, "name": "x"}"#);

    for method in [HttpMethod::Get, HttpMethod::post(b"{}".to_vec())] {
        let result: Result<Item, _> = NetworkClient::new()
            .request(&transport, &Unaddressable(method))
            .await;
        assert_eq!(result.unwrap_err().network(), Some(&NetworkError::BadRequest));
    }
    assert!(transport.sent().is_empty(), "nothing may be sent");
}

#[tokio::test]
async fn test_unresolvable_endpoint_is_a_bad_request() {
    let transport = StubTransport::new(200, "{}");
    let endpoint = Endpoint::get("not a host", "/x");

    assert_eq!(endpoint.resolve(), Err(NetworkError::InvalidUrl));
    let result: Result<Item, _> = NetworkClient::new().request(&transport, &endpoint).await;
    assert_eq!(result.unwrap_err().network(), Some(&NetworkError::BadRequest));
}

#[tokio::test]
async fn test_malformed_authority_is_a_bad_request_and_nothing_is_sent() {
    let transport = StubTransport::new(200, "{}");

    for host in ["a:b:c", "example.com:70000"] {
        let endpoint = Endpoint::get(host, "/x");
        assert_eq!(endpoint.resolve(), Err(NetworkError::InvalidUrl), "host {host:?}");

        let result: Result<Item, _> = NetworkClient::new().request(&transport, &endpoint).await;
        assert_eq!(
            result.unwrap_err().network(),
            Some(&NetworkError::BadRequest),
            "host {host:?}"
        );
    }
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_fragment_marker_in_path_keeps_the_query() {
    let transport = StubTransport::new(200, r#"{"id": 1, "name": "x"}"#);
    let endpoint = Endpoint::get("api.example.com", "/items#top").with_query("page", "2");

    let _: Item = NetworkClient::new()
        .request(&transport, &endpoint)
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(
        sent[0].address().as_str(),
        "https://api.example.com/items%23top?page=2"
    );
}

#[tokio::test]
async fn test_not_found_reports_exact_status() {
    let transport = StubTransport::new(404, r#"{"id": 7, "name": "a"}"#);

    let result: Result<Item, _> = NetworkClient::new().request(&transport, &items()).await;

    assert_eq!(
        result.unwrap_err().network(),
        Some(&NetworkError::InvalidStatusCode { code: 404 })
    );
}

#[tokio::test]
async fn test_status_boundaries() {
    for (status, accepted) in [(199, false), (200, true), (300, true), (301, false), (500, false)] {
        let transport = StubTransport::new(status, r#"{"id": 1, "name": "x"}"#);
        let result: Result<Item, _> = NetworkClient::new().request(&transport, &items()).await;
        match result {
            Ok(_) => assert!(accepted, "status {status} must fail"),
            Err(error) => {
                assert!(!accepted, "status {status} must succeed");
                assert_eq!(
                    error.network(),
                    Some(&NetworkError::InvalidStatusCode { code: status })
                );
            }
        }
    }
}

#[tokio::test]
async fn test_missing_field_is_a_decoding_error_naming_it() {
    let transport = StubTransport::new(200, r#"{"name": "a"}"#);

    let result: Result<Item, _> = NetworkClient::new().request(&transport, &items()).await;

    match result.unwrap_err() {
        RequestError::Network(NetworkError::DecodingError { description }) => {
            assert!(description.contains("id"), "{description}");
            assert_eq!(description, "Missing key 'id' in Item at path: ");
        }
        other => panic!("expected a decoding error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_decoding_runs_only_after_status_passes() {
    // Undecodable body with a failing status: the status wins.
    let transport = StubTransport::new(500, "<html>oops</html>");
    let result: Result<Item, _> = NetworkClient::new().request(&transport, &items()).await;
    assert_eq!(
        result.unwrap_err().network(),
        Some(&NetworkError::InvalidStatusCode { code: 500 })
    );
}

// ============================================================================
// Transport faults
// ============================================================================

#[tokio::test]
async fn test_transport_fault_is_not_reclassified() {
    let result: Result<Item, _> = NetworkClient::new()
        .request(&RefusingTransport, &items())
        .await;

    let error = result.unwrap_err();
    assert!(error.network().is_none());
    assert!(matches!(error, RequestError::Transport(Refused)));
}

// ============================================================================
// Injected decoder
// ============================================================================

/// Rejects everything, to prove the client routes through its decoder.
struct RejectingDecoder;

impl StructuredDecoder for RejectingDecoder {
    fn decode<T>(&self, _bytes: &[u8]) -> Result<T, DecodeFailure>
    where
        T: DeserializeOwned,
    {
        Err(DecodeFailure::Other {
            message: "rejected".into(),
        })
    }
}

#[tokio::test]
async fn test_custom_decoder_failures_are_normalised() {
    let transport = StubTransport::new(200, r#"{"id": 7, "name": "a"}"#);

    let result: Result<Item, _> = NetworkClient::with_decoder(RejectingDecoder)
        .request(&transport, &items())
        .await;

    assert_eq!(
        result.unwrap_err().network(),
        Some(&NetworkError::DecodingError {
            description: "Failed to decode Item: rejected".into()
        })
    );
}

// ============================================================================
// Independence
// ============================================================================

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let client = NetworkClient::new();
    let endpoints: Vec<Endpoint> = (0..16)
        .map(|i| Endpoint::get("api.example.com", format!("/items/{i}")))
        .collect();

    let results = collect_concurrently(&client, &endpoints).await;

    for (i, item) in results.into_iter().enumerate() {
        assert_eq!(item.name, format!("https://api.example.com/items/{i}"));
    }
}

async fn collect_concurrently(client: &NetworkClient, endpoints: &[Endpoint]) -> Vec<Item> {
    let mut set = tokio::task::JoinSet::new();
    for (i, endpoint) in endpoints.iter().cloned().enumerate() {
        let client = client.clone();
        set.spawn(async move {
            let item: Item = client.request(&EchoTransport, &endpoint).await.unwrap();
            (i, item)
        });
    }
    let mut results: Vec<(usize, Item)> = Vec::new();
    while let Some(joined) = set.join_next().await {
        results.push(joined.unwrap());
    }
    results.sort_by_key(|(i, _)| *i);
    results.into_iter().map(|(_, item)| item).collect()
}
