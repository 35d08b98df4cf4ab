mod common;

use axum::http::StatusCode;
use common::{closed_endpoint, FakeServer};
use serde_json::json;
use verbex::sdk::{ApiError, ClientConfig, TransportError, VerbexClient};

fn client_for(endpoint: &str, key: &str) -> VerbexClient {
    let cfg = ClientConfig::new(endpoint, key)
        .with_connect_timeout_secs(2)
        .with_timeout_secs(5);
    VerbexClient::new(&cfg).expect("client")
}

#[tokio::test]
async fn closed_port_is_a_transport_error() {
    let endpoint = closed_endpoint().await;
    let client = client_for(&endpoint, "key");

    let err = client.health_check().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(TransportError::Connect(_))));
    assert_eq!(err.status_code(), 0);
    assert!(err.envelope().is_none());
    assert!(err.to_string().starts_with("Request failed: "));
}

#[tokio::test]
async fn plain_text_gateway_error_is_a_server_error() {
    let server = FakeServer::plain_text(StatusCode::BAD_GATEWAY, "Bad Gateway").await;
    let client = client_for(&server.endpoint(), "key");

    let err = client.list_indices().await.unwrap_err();

    assert!(matches!(err, ApiError::Server(_)));
    assert_eq!(err.status_code(), 502);
    assert_eq!(err.message(), "Request failed with status 502");
    let envelope = err.envelope().expect("fallback envelope");
    assert_eq!(envelope.data(), Some(&json!("Bad Gateway")));
    assert!(!envelope.is_success());
}

#[tokio::test]
async fn plain_text_success_is_returned_as_data() {
    let server = FakeServer::plain_text(StatusCode::OK, "OK").await;
    let client = client_for(&server.endpoint(), "key");

    let envelope = client.root_health_check().await.unwrap();

    assert!(envelope.is_success());
    assert_eq!(envelope.status_code(), 200);
    assert_eq!(envelope.data(), Some(&json!("OK")));
}

#[tokio::test]
async fn plain_text_not_found_is_classified() {
    let server = FakeServer::plain_text(StatusCode::NOT_FOUND, "Not Found").await;
    let client = client_for(&server.endpoint(), "key");

    let err = client.get_index("anything").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn wrong_key_is_unauthorized() {
    let server = FakeServer::start().await;
    let client = client_for(&server.endpoint(), "wrong");

    let err = client.list_indices().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.status_code(), 401);
    assert_eq!(err.message(), "Invalid or missing bearer token");
    assert_eq!(
        err.envelope().and_then(|e| e.error_message()),
        Some("Invalid or missing bearer token")
    );
}

#[tokio::test]
async fn public_routes_ignore_the_key() {
    let server = FakeServer::start().await;
    let client = client_for(&server.endpoint(), "wrong");

    assert!(client.health_check().await.is_ok());
    let err = client.login("admin", "nope").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Invalid username or password");
}
