//! HTTP surface of the identity service, driven in-process.

use actix_web::{http::StatusCode, test, web, App};
use chrono::Duration;
use crypto_core::JwtKeys;
use identity_service::{routes, TokenIssuer};
use principal_store::{InMemoryCredentialStore, StoreBackend};
use serde_json::{json, Value};
use std::sync::Arc;

const SECRET: &[u8] = b"identity-http-test-secret-0123456789";

fn issuer() -> web::Data<TokenIssuer> {
    web::Data::new(TokenIssuer::new(
        Arc::new(StoreBackend::Substitute(InMemoryCredentialStore::new())),
        Arc::new(JwtKeys::from_secret(SECRET)),
        Duration::hours(24),
    ))
}

macro_rules! app {
    ($issuer:expr) => {
        test::init_service(
            App::new()
                .app_data($issuer.clone())
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! post {
    ($app:expr, $uri:expr, $body:expr $(,)?) => {{
        let req = test::TestRequest::post().uri($uri).set_json($body).to_request();
        let resp = test::call_service($app, req).await;
        let status: StatusCode = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_health() {
    let issuer = issuer();
    let app = app!(issuer);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_register_login_validate_flow() {
    let issuer = issuer();
    let app = app!(issuer);

    let (status, body) = post!(
        &app,
        "/api/v1/auth/register",
        json!({"email": "carol@example.com", "password": "secret99", "name": "Carol"}),
    );
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["user_id"].as_str().unwrap().to_string();
    assert!(!user_id.is_empty());

    let (status, body) = post!(
        &app,
        "/api/v1/auth/login",
        json!({"email": "carol@example.com", "password": "secret99"}),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id.as_str());
    assert_eq!(body["expires_in"], 86_400);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = post!(&app, "/api/v1/auth/validate", json!({ "token": token }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"valid": true, "user_id": user_id}));
}

#[actix_web::test]
async fn test_register_conflict_and_bad_input() {
    let issuer = issuer();
    let app = app!(issuer);
    let body = json!({"email": "dave@example.com", "password": "secret99", "name": "Dave"});

    let (status, _) = post!(&app, "/api/v1/auth/register", body.clone());
    assert_eq!(status, StatusCode::CREATED);

    let (status, err) = post!(&app, "/api/v1/auth/register", body);
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "ALREADY_EXISTS");

    let (status, err) = post!(
        &app,
        "/api/v1/auth/register",
        json!({"email": "not-an-email", "password": "secret99", "name": "X"}),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "INVALID_ARGUMENT");
}

#[actix_web::test]
async fn test_login_failures_are_uniform() {
    let issuer = issuer();
    let app = app!(issuer);
    post!(
        &app,
        "/api/v1/auth/register",
        json!({"email": "erin@example.com", "password": "secret99", "name": "Erin"}),
    );

    let (s1, unknown) = post!(
        &app,
        "/api/v1/auth/login",
        json!({"email": "ghost@example.com", "password": "secret99"}),
    );
    let (s2, wrong) = post!(
        &app,
        "/api/v1/auth/login",
        json!({"email": "erin@example.com", "password": "secret00"}),
    );

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
    assert_eq!(unknown["message"], "invalid credentials");

    let (status, err) = post!(&app, "/api/v1/auth/login", json!({}));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "INVALID_ARGUMENT");
}

#[actix_web::test]
async fn test_validate_rejects_unusable_tokens() {
    let issuer = issuer();
    let app = app!(issuer);
    let foreign = crypto_core::issue_token(
        &JwtKeys::from_secret(b"some-other-secret"),
        "user-1",
        Duration::hours(1),
    )
    .unwrap();

    for token in ["", "garbage", foreign.as_str()] {
        let (status, body) = post!(&app, "/api/v1/auth/validate", json!({ "token": token }));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"valid": false, "user_id": ""}), "token {token:?}");
    }
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let issuer = issuer();
    let app = app!(issuer);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_ARGUMENT");
}

#[actix_web::test]
async fn test_seeded_demo_account_logs_in() {
    let issuer = issuer();
    issuer.seed_demo_accounts().await.unwrap();
    let app = app!(issuer);

    let (status, body) = post!(
        &app,
        "/api/v1/auth/login",
        json!({"email": "user@example.com", "password": "password123"}),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "00000000-0000-0000-0000-000000000002");
}
