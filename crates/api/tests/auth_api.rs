//! Integration tests for bearer-token verification and the login endpoint.

mod common;

use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::{body_json, get, get_auth, get_with_header, ALICE_EMAIL, ALICE_PASSWORD, ALICE_TOKEN};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn basic(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

// ---------------------------------------------------------------------------
// Bearer tokens
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_authorization_header_returns_403() {
    let app = common::build_test_app();
    let response = get(app, "/v1/pets").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Not authenticated");
}

#[tokio::test]
async fn non_bearer_scheme_returns_403() {
    let app = common::build_test_app();
    let response = get_with_header(app, "/v1/logs", "Token abc").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_bearer_token_returns_401() {
    let app = common::build_test_app();
    let response = get_auth(app, "/v1/pets", "BAD_TOKEN").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Unauthorized");
}

#[tokio::test]
async fn valid_bearer_token_is_accepted() {
    let app = common::build_test_app();
    let response = get_auth(app, "/v1/pets", ALICE_TOKEN).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// GET /v1/auth/login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_valid_credentials_returns_token() {
    let app = common::build_test_app();
    let response = get_with_header(
        app,
        "/v1/auth/login",
        &basic(ALICE_EMAIL, ALICE_PASSWORD),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["access_token"], ALICE_TOKEN);
    assert_eq!(json["expires_in"], 3600);
}

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let app = common::build_test_app();
    let response = get_with_header(app, "/v1/auth/login", &basic(ALICE_EMAIL, "nope")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Unauthorized");
}

#[tokio::test]
async fn login_without_credentials_challenges_for_basic() {
    let app = common::build_test_app();
    let response = get(app, "/v1/auth/login").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get(WWW_AUTHENTICATE).unwrap(), "Basic");
}

#[tokio::test]
async fn login_with_undecodable_credentials_returns_401() {
    let app = common::build_test_app();
    let response = get_with_header(app, "/v1/auth/login", "Basic !!!not-base64").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
