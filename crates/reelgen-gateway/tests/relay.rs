//! Relay behavior tests against a mocked upstream.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reelgen_gateway::{create_router, AppState, GatewayConfig};

fn test_router(upstream_base: String, api_token: Option<&str>) -> axum::Router {
    let config = GatewayConfig {
        upstream_base,
        api_token: api_token.map(String::from),
        ..GatewayConfig::default()
    };
    create_router(AppState::new(config).expect("client builds"))
}

async fn body_value(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn injects_credential_and_strips_prefix() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predictions"))
        .and(header("Authorization", "Bearer tok_test"))
        .and(body_json(json!({"version": "v1", "input": {"prompt": "a cat"}})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "abc", "status": "starting"})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let app = test_router(upstream.uri(), Some("tok_test"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upstream/predictions")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"version": "v1", "input": {"prompt": "a cat"}}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_value(response).await;
    assert_eq!(body["id"], "abc");
    assert_eq!(body["status"], "starting");
}

#[tokio::test]
async fn mirrors_upstream_errors_verbatim() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predictions"))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({"detail": "insufficient credit"})),
        )
        .mount(&upstream)
        .await;

    let app = test_router(upstream.uri(), Some("tok_test"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upstream/predictions")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    let body = body_value(response).await;
    assert_eq!(body["detail"], "insufficient credit");
    // Verbatim upstream body, not a gateway-shaped error
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn relays_polls_by_sub_path() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predictions/abc"))
        .and(header("Authorization", "Bearer tok_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc",
            "status": "succeeded",
            "output": ["https://cdn/x.mp4"]
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = test_router(upstream.uri(), Some("tok_test"));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/upstream/predictions/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_value(response).await;
    assert_eq!(body["output"][0], "https://cdn/x.mp4");
}

#[tokio::test]
async fn missing_credential_is_a_local_500_with_zero_upstream_calls() {
    let upstream = MockServer::start().await;

    // Nothing may reach upstream when the token is absent
    Mock::given(method("POST"))
        .and(path("/predictions"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = test_router(upstream.uri(), None);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upstream/predictions")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_value(response).await;
    assert_eq!(body["code"], "configuration_error");
    assert!(body["detail"].as_str().unwrap().contains("token"));
}

#[tokio::test]
async fn health_reports_credential_state() {
    let app = test_router("http://127.0.0.1:1".to_string(), None);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_value(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["credential_configured"], false);
}
