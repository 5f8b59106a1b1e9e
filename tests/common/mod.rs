//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quill::client::ApiConfig;

/// Path the mock rephrase endpoint is mounted at.
pub const REPHRASE_PATH: &str = "/api/v1/rephrase";

/// Start a mock server that simulates the rephrase API
pub async fn start_rephrase_mock() -> MockServer {
    MockServer::start().await
}

/// Request configuration pointed at the mock server
pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig::new("test-key", format!("{}{}", server.uri(), REPHRASE_PATH))
}

/// Mount a success response: `{"result": [...]}`
pub async fn mount_rephrase_success(server: &MockServer, results: &[&str]) {
    let body = serde_json::json!({ "result": results });

    Mock::given(method("POST"))
        .and(path(REPHRASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a failure response with a `msg` body
pub async fn mount_rephrase_error(server: &MockServer, status: u16, msg: &str) {
    let body = serde_json::json!({ "msg": msg });

    Mock::given(method("POST"))
        .and(path(REPHRASE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a failure response with no parseable body
pub async fn mount_rephrase_error_without_body(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(REPHRASE_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// The JSON body of the single request the server received.
pub async fn received_payload(server: &MockServer) -> serde_json::Value {
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one outbound request");
    serde_json::from_slice(&requests[0].body).expect("JSON request body")
}
