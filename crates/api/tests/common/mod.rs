#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use poopyrus_api::config::{IdentityConfig, ServerConfig, StoreConfig};
use poopyrus_api::identity::static_tokens::StaticConfig;
use poopyrus_api::identity::StaticIdentity;
use poopyrus_api::router::build_app_router;
use poopyrus_api::state::AppState;
use poopyrus_db::MemoryStore;

/// Bearer token accepted for the first test user.
pub const ALICE_TOKEN: &str = "alice-token";
pub const ALICE_ID: &str = "alice-uid";
/// Bearer token accepted for a second, unrelated user.
pub const BOB_TOKEN: &str = "bob-token";
pub const BOB_ID: &str = "bob-uid";

pub const ALICE_EMAIL: &str = "alice@example.com";
pub const ALICE_PASSWORD: &str = "correct horse";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses the in-memory store and static identity provider so no external
/// services are needed.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        store: StoreConfig::Memory,
        identity: IdentityConfig::Static(StaticConfig {
            token: ALICE_TOKEN.to_string(),
            user_id: ALICE_ID.to_string(),
            email: Some(ALICE_EMAIL.to_string()),
            password: Some(ALICE_PASSWORD.to_string()),
        }),
    }
}

/// Build the full application router backed by a fresh in-memory store.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack as the binary.
pub fn build_test_app() -> Router {
    let config = test_config();
    let identity = StaticIdentity::new()
        .with_token(ALICE_TOKEN, ALICE_ID)
        .with_token(BOB_TOKEN, BOB_ID)
        .with_account(ALICE_EMAIL, ALICE_PASSWORD, ALICE_TOKEN);

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        identity: Arc::new(identity),
    };

    build_app_router(state, &config)
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
}

/// Send an unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

/// Send a GET with a raw `Authorization` header value.
pub async fn get_with_header(app: Router, uri: &str, authorization: &str) -> Response<Body> {
    let req = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST a raw body, for malformed-JSON cases.
pub async fn post_raw_auth(app: Router, uri: &str, token: &str, body: &str) -> Response<Body> {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        request(Method::PATCH, uri, Some(token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
