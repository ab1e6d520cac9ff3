//! Integration tests for the HTTP surface.
//!
//! Requests go through the full axum router (auth middleware, CORS, error
//! mapping) with `tower::ServiceExt::oneshot`, backed by mock dependencies.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server_core::domains::auth::JwtService;
use server_core::kernel::{InMemoryVerificationStore, MockAI, ProgressHub, TestDependencies};
use server_core::server::{build_app, AppState};
use tower::ServiceExt;

// ============================================================================
// Test Helpers
// ============================================================================

fn jwt_service() -> Arc<JwtService> {
    Arc::new(JwtService::new("test_secret_key", "test_issuer".to_string()))
}

fn app_for(test: &TestDependencies) -> Router {
    let state = AppState {
        deps: test.server_deps(),
        jwt_service: jwt_service(),
        progress_hub: ProgressHub::new(),
    };
    build_app(state, &[])
}

fn token_for(email: &str) -> String {
    jwt_service().create_token("user-1", email).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_verify_requires_token() {
    let app = app_for(&scripted_deps());

    let (status, body) = send(&app, post_json("/verify", None, &json!({"claim": CLAIM}).to_string())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Access token required"}));
}

#[tokio::test]
async fn test_verify_rejects_invalid_token() {
    let app = app_for(&scripted_deps());

    let (status, body) = send(
        &app,
        post_json("/verify", Some("not-a-jwt"), &json!({"claim": CLAIM}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Invalid token"}));
}

#[tokio::test]
async fn test_logs_requires_token() {
    let app = app_for(&scripted_deps());

    let (status, _) = send(&app, get("/logs", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// POST /verify
// ============================================================================

#[tokio::test]
async fn test_verify_success_shape() {
    let test = scripted_deps();
    let app = app_for(&test);
    let token = token_for(USER_EMAIL);

    let (status, body) = send(
        &app,
        post_json("/verify", Some(&token), &json!({"claim": CLAIM}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["claim"], CLAIM);
    assert_eq!(
        body["extraction"],
        json!({"event": "earthquake", "location": "Tokyo", "time": "yesterday"})
    );
    assert_eq!(body["verification"]["result"], "Occurred");
    assert!(body["id"].is_string());

    let evidence = body["evidence"].as_array().unwrap();
    assert_eq!(evidence.len(), 3);
    assert_eq!(evidence[0]["source"], "web search");
    assert_eq!(evidence[2]["source"], "fact-check index");
    assert_eq!(evidence[2]["publisher"], "Factly");

    assert_eq!(test.store.events().len(), 1);
}

#[tokio::test]
async fn test_verify_missing_claim_is_bad_request() {
    let test = scripted_deps();
    let app = app_for(&test);
    let token = token_for(USER_EMAIL);

    for payload in [json!({}), json!({"claim": ""}), json!({"claim": "   "})] {
        let (status, body) = send(&app, post_json("/verify", Some(&token), &payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing claim"}));
    }

    assert!(test.store.events().is_empty());
    assert!(test.progress.events().is_empty());
}

#[tokio::test]
async fn test_verify_malformed_body_is_bad_request() {
    let app = app_for(&scripted_deps());
    let token = token_for(USER_EMAIL);

    let (status, body) = send(&app, post_json("/verify", Some(&token), "{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_verify_pipeline_failure_is_server_error() {
    let ai = MockAI::new().with_response(EXTRACTION_PROMPT, "");
    let test = TestDependencies::new().mock_ai(ai);
    let app = app_for(&test);
    let token = token_for(USER_EMAIL);

    let (status, body) = send(
        &app,
        post_json("/verify", Some(&token), &json!({"claim": CLAIM}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to extract event info"}));
}

#[tokio::test]
async fn test_verify_alias_route() {
    let app = app_for(&scripted_deps());
    let token = token_for(USER_EMAIL);

    let (status, body) = send(
        &app,
        post_json("/api/verify-event", Some(&token), &json!({"claim": CLAIM}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verification"]["result"], "Occurred");
}

// ============================================================================
// GET /logs
// ============================================================================

#[tokio::test]
async fn test_logs_returns_only_callers_records() {
    let app = app_for(&scripted_deps());
    let alice = token_for("Alice@Example.com");
    let bob = token_for("bob@example.com");

    let claim = json!({"claim": CLAIM}).to_string();
    send(&app, post_json("/verify", Some(&alice), &claim)).await;
    send(&app, post_json("/verify", Some(&bob), &claim)).await;

    let (status, body) = send(&app, get("/logs", Some(&alice))).await;
    assert_eq!(status, StatusCode::OK);

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["userEmail"], "alice@example.com");
    assert_eq!(records[0]["claim"], CLAIM);
    assert!(records[0]["createdAt"].is_string());

    let (_, alias_body) = send(&app, get("/api/verify-event/logs", Some(&alice))).await;
    assert_eq!(alias_body, body);
}

#[tokio::test]
async fn test_logs_empty_for_new_user() {
    let app = app_for(&scripted_deps());
    let token = token_for("nobody@example.com");

    let (status, body) = send(&app, get("/logs", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// ============================================================================
// GET /health
// ============================================================================

#[tokio::test]
async fn test_health_ok() {
    let app = app_for(&scripted_deps());

    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["websocketConnections"], 0);
    assert_eq!(body["database"]["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let test = scripted_deps().mock_store(InMemoryVerificationStore::unreachable());
    let app = app_for(&test);

    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["status"], "error");
}
