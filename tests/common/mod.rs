#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use bookmark_api::application::ports::bookmark_repository::BookmarkRepository;
use bookmark_api::bootstrap::app_context::{AppContext, AppServices};
use bookmark_api::bootstrap::config::{Config, StoreBackend};
use bookmark_api::bootstrap::router::build_router;
use bookmark_api::infrastructure::memory::MemoryUserRepository;

pub fn test_config() -> Config {
    Config {
        api_port: 0,
        frontend_url: None,
        database_url: String::new(),
        database_max_connections: 1,
        store_backend: StoreBackend::Memory,
        jwt_secret_pem: "integration-test-secret".into(),
        jwt_expires_secs: 300,
        is_production: false,
    }
}

/// Fresh application over empty in-memory stores.
pub fn app() -> Router {
    build_router(AppContext::new(test_config(), AppServices::in_memory()))
}

/// Application over the given bookmark store and an empty user store.
pub fn app_with_bookmarks(bookmarks: Arc<dyn BookmarkRepository>) -> Router {
    let services = AppServices::new(bookmarks, Arc::new(MemoryUserRepository::new()), None);
    build_router(AppContext::new(test_config(), services))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    TestResponse { status, body }
}

/// Signs up a new account and returns its access token.
pub async fn signup(app: &Router, email: &str) -> String {
    let res = send(
        app,
        "POST",
        "/auth/signup",
        None,
        Some(serde_json::json!({ "email": email, "password": "123" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED, "signup failed: {}", res.body);
    res.body["access_token"]
        .as_str()
        .expect("access_token")
        .to_string()
}
