//! Integration tests for the binvault-api HTTP endpoints
//!
//! Drives the full router (auth middleware included) against temp-dir
//! backed stores, covering:
//! - Health endpoint (no auth required)
//! - Login success/failure and logout
//! - Auth gate on lookup and admin routes
//! - End-to-end add → lookup → remove flow
//! - Empty query handling and the daily request counter

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method
use uuid::Uuid;

use binvault_api::events::EventLog;
use binvault_api::service::QueryService;
use binvault_api::session::SessionStore;
use binvault_api::store::RecordStore;
use binvault_api::{build_router, AppState};
use binvault_common::auth::{hash_password, AdminCredentials};

const USERNAME: &str = "Admin";
const PASSWORD: &str = "Admin@000";

/// Test helper: build an app backed by a fresh temp dir
async fn setup_app() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Should create temp dir");

    let store = RecordStore::open(dir.path().join("sites.json"))
        .await
        .expect("Should open record store");
    let events = EventLog::open(dir.path().join("stats.json"))
        .await
        .expect("Should open event log");
    let service = Arc::new(QueryService::new(Arc::new(store), Arc::new(events)));

    let salt = "testsalt".to_string();
    let credentials = AdminCredentials {
        username: USERNAME.to_string(),
        password_hash: hash_password(PASSWORD, &salt),
        password_salt: salt,
    };

    let state = AppState::new(service, Arc::new(SessionStore::new()), credentials);
    (build_router(state), dir)
}

/// Test helper: GET request with optional bearer token
fn get(uri: &str, token: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Test helper: POST request with JSON body and optional bearer token
fn post_json(uri: &str, body: Value, token: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: Log in with the configured credentials, returning the token
async fn login(app: &axum::Router) -> Uuid {
    let request = post_json(
        "/admin/login",
        json!({"username": USERNAME, "password": PASSWORD}),
        None,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    Uuid::parse_str(body["token"].as_str().expect("token present")).unwrap()
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "binvault-api");
    assert!(body["version"].is_string());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_login_with_wrong_credentials_rejected() {
    let (app, _dir) = setup_app().await;

    let request = post_json(
        "/admin/login",
        json!({"username": USERNAME, "password": "wrong"}),
        None,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let (app, _dir) = setup_app().await;

    for request in [
        get("/lookup?search=shop.io", None),
        get("/admin/stats", None),
        post_json("/admin/add", json!({"site": "shop.io", "bin": "1"}), None),
        post_json("/admin/remove", json!({"site": "shop.io"}), None),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = extract_json(response.into_body()).await;
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_denied_mutation_leaves_no_trace() {
    let (app, _dir) = setup_app().await;

    // Unauthenticated add must not create a record
    let request = post_json("/admin/add", json!({"site": "shop.io", "bin": "1"}), None);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unauthenticated lookups must not count as events either
    let request = get("/lookup?search=shop.io", None);
    app.clone().oneshot(request).await.unwrap();

    let token = login(&app).await;
    let response = app
        .clone()
        .oneshot(get("/admin/stats", Some(token)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["reqs"], 0);
}

#[tokio::test]
async fn test_random_token_rejected() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(get("/admin/stats", Some(Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let (app, _dir) = setup_app().await;
    let token = login(&app).await;

    // Token works before logout
    let response = app
        .clone()
        .oneshot(get("/admin/stats", Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/admin/logout", Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    // ...and is dead after
    let response = app
        .oneshot(get("/admin/stats", Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_revokes_presented_token() {
    let (app, _dir) = setup_app().await;
    let old_token = login(&app).await;

    // Logging in while presenting an existing token must not keep it alive
    let request = post_json(
        "/admin/login",
        json!({"username": USERNAME, "password": PASSWORD}),
        Some(old_token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/admin/stats", Some(old_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// End-to-end Lookup Flow
// =============================================================================

#[tokio::test]
async fn test_add_lookup_remove_flow() {
    let (app, _dir) = setup_app().await;
    let token = login(&app).await;

    // Add a bin for shop.io
    let request = post_json(
        "/admin/add",
        json!({"site": "shop.io", "bin": "4521"}),
        Some(token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    // Lookup is case/scheme-insensitive
    let response = app
        .clone()
        .oneshot(get("/lookup?search=SHOP.IO", Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "Found");
    assert_eq!(body["site"], "shop.io");
    assert_eq!(body["bins"], json!(["4521"]));

    // Stats reflect the record and the lookup
    let response = app
        .clone()
        .oneshot(get("/admin/stats", Some(token)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["reqs"], 1);
    assert!(body["db_size"].as_u64().unwrap() > 0);

    // Remove the record
    let request = post_json("/admin/remove", json!({"site": "shop.io"}), Some(token));
    let response = app.clone().oneshot(request).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    // Subsequent lookup misses
    let response = app
        .clone()
        .oneshot(get("/lookup?search=shop.io", Some(token)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "Not Found");

    // Removing again reports no record
    let request = post_json("/admin/remove", json!({"site": "shop.io"}), Some(token));
    let response = app.oneshot(request).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_add_accepts_numeric_bin() {
    let (app, _dir) = setup_app().await;
    let token = login(&app).await;

    let request = post_json(
        "/admin/add",
        json!({"site": "shop.io", "bin": 7788}),
        Some(token),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/lookup?search=shop.io", Some(token)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["bins"], json!(["7788"]));
}

#[tokio::test]
async fn test_add_rejects_unresolvable_site() {
    let (app, _dir) = setup_app().await;
    let token = login(&app).await;

    let request = post_json(
        "/admin/add",
        json!({"site": "http://", "bin": "4521"}),
        Some(token),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_empty_query_does_not_count_as_event() {
    let (app, _dir) = setup_app().await;
    let token = login(&app).await;

    for uri in ["/lookup?search=", "/lookup"] {
        let response = app.clone().oneshot(get(uri, Some(token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = extract_json(response.into_body()).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["msg"], "Empty query");
    }

    let response = app
        .oneshot(get("/admin/stats", Some(token)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["reqs"], 0);
}
