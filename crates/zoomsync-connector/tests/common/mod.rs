//! Common test utilities for zoomsync-connector integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zoomsync_connector::{TokenCache, ZoomClient, ZoomConfig, ZoomCredentials};

/// Builds a client pointed at a mock server.
pub fn test_client(server: &MockServer) -> ZoomClient {
    test_client_with_page_size(server, 30)
}

/// Builds a client with an explicit page size.
pub fn test_client_with_page_size(server: &MockServer, page_size: u32) -> ZoomClient {
    let config = ZoomConfig::builder()
        .account_id("test-account")
        .api_base_url(format!("{}/v2", server.uri()))
        .token_url(format!("{}/oauth/token", server.uri()))
        .page_size(page_size)
        .build()
        .expect("valid test config");

    let credentials = ZoomCredentials {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string().into(),
    };

    let token_cache = Arc::new(TokenCache::new(credentials, &config));
    ZoomClient::new(token_cache, config).expect("client construction")
}

/// Creates a mock OAuth token response.
pub fn token_response(access_token: &str, expires_in: u64) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": expires_in
    })
}

/// Mounts a token endpoint returning a fixed token.
pub async fn mock_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response("mock-token", 3600)))
        .mount(server)
        .await;
}

/// Test data factory for a Zoom user record.
pub fn test_user(id: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@example.com"),
        "first_name": "Test",
        "last_name": "User",
        "type": 1,
        "status": "active"
    })
}

/// Test data factory for a group member record.
pub fn test_member(id: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@example.com"),
        "type": 1
    })
}

/// Wraps records in a paginated list response.
pub fn page_response(field: &str, records: Vec<Value>, next_page_token: &str) -> Value {
    json!({
        "page_size": 30,
        "total_records": records.len(),
        "next_page_token": next_page_token,
        field: records
    })
}
