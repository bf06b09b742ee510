//! API router configuration.
//!
//! - `GET  /health` - liveness probe
//! - `GET  /openapi.json` - OpenAPI document
//! - `GET  /users` - full drained user list
//! - `POST /users/dummy/:count` - generate test users
//! - `GET  /groups/:group_id/members` - full drained member list
//! - `POST /reconcile` - run a reconciliation cycle

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_dummy_users_handler, health_handler, list_group_members_handler, list_users_handler,
    reconcile_handler,
};
use crate::openapi::openapi_handler;
use crate::state::AppState;

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/openapi.json", get(openapi_handler))
        .route("/users", get(list_users_handler))
        .route("/users/dummy/:count", post(create_dummy_users_handler))
        .route("/groups/:group_id/members", get(list_group_members_handler))
        .route("/reconcile", post(reconcile_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server_uri: &str) -> Config {
        Config {
            client_id: "test-client".to_string(),
            client_secret: SecretString::new("test-secret".to_string()),
            account_id: "test-account".to_string(),
            api_base_url: format!("{server_uri}/v2"),
            token_url: format!("{server_uri}/oauth/token"),
            target_group_id: "target-group".to_string(),
            exempt_group_ids: vec!["exempt-1".to_string(), "exempt-2".to_string()],
            page_size: 30,
            batch_size: 30,
            rust_log: "info".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }

    fn test_router(server: &MockServer) -> Router {
        let state = AppState::from_config(&test_config(&server.uri())).expect("state wiring");
        build_router(state)
    }

    async fn mock_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "mock-token",
                "token_type": "bearer",
                "expires_in": 3600
            })))
            .mount(server)
            .await;
    }

    fn page(field: &str, ids: &[&str], next: &str) -> Value {
        json!({
            "next_page_token": next,
            field: ids.iter().map(|id| json!({"id": id, "email": format!("{id}@example.com")})).collect::<Vec<_>>()
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        let app = test_router(&server);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let server = MockServer::start().await;
        let app = test_router(&server);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["paths"].get("/reconcile").is_some());
    }

    /// An invalid count is rejected before any network call.
    #[tokio::test]
    async fn test_dummy_count_validated_before_network() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = test_router(&server);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users/dummy/0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Invalid Count");
    }

    /// Token failure surfaces as a 400 problem response.
    #[tokio::test]
    async fn test_token_failure_is_bad_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "invalid_client"
            })))
            .mount(&server)
            .await;

        let app = test_router(&server);
        let response = app
            .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Authentication Failed");
    }

    /// The users route drains every page into one response.
    #[tokio::test]
    async fn test_list_users_drained() {
        let server = MockServer::start().await;
        mock_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/v2/users"))
            .and(query_param_is_missing("next_page_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("users", &["u1", "u2"], "c1")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/users"))
            .and(query_param("next_page_token", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("users", &["u3"], "")))
            .mount(&server)
            .await;

        let app = test_router(&server);
        let response = app
            .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    /// Upstream fetch failures propagate the upstream status code.
    #[tokio::test]
    async fn test_upstream_status_propagated() {
        let server = MockServer::start().await;
        mock_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/v2/users"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": 1001,
                "message": "User does not exist"
            })))
            .mount(&server)
            .await;

        let app = test_router(&server);
        let response = app
            .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Upstream Error");
    }

    #[tokio::test]
    async fn test_group_members_route() {
        let server = MockServer::start().await;
        mock_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/v2/groups/g1/members"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page("members", &["m1", "m2"], "")),
            )
            .mount(&server)
            .await;

        let app = test_router(&server);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/groups/g1/members")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["group_id"], "g1");
        assert_eq!(body["total"], 2);
    }

    /// A reconciliation run over the mock account returns the full report.
    #[tokio::test]
    async fn test_reconcile_route() {
        let server = MockServer::start().await;
        mock_token(&server).await;

        Mock::given(method("GET"))
            .and(path("/v2/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("users", &["A", "B"], "")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/groups/target-group/members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("members", &[], "")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/groups/exempt-1/members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("members", &["B"], "")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/groups/exempt-2/members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("members", &[], "")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/groups/target-group/members"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ids": "A"})))
            .expect(1)
            .mount(&server)
            .await;

        let app = test_router(&server);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reconcile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["to_add"], json!(["A"]));
        assert_eq!(body["to_remove"], json!([]));
        assert_eq!(body["failures"], json!([]));
    }

    /// Dummy users are created sequentially and reported per outcome.
    #[tokio::test]
    async fn test_dummy_user_generation() {
        let server = MockServer::start().await;
        mock_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/v2/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "new-user",
                "email": "new-user@example.com"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let app = test_router(&server);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users/dummy/2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["requested"], 2);
        assert_eq!(body["created"].as_array().unwrap().len(), 2);
        assert_eq!(body["failures"], json!([]));
    }
}
