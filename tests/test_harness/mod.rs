//! Shared setup for cross-service tests: a real identity service on a local
//! port and validators pointed at it.

#![allow(dead_code)]

use actix_web::web;
use chrono::Duration;
use crypto_core::{JwtKeys, DEV_FALLBACK_SECRET};
use identity_service::{startup, TokenIssuer};
use jwt_validation::{LocalValidator, RemoteValidator, RemoteValidatorConfig, Validator};
use principal_store::fixtures::demo_profiles;
use principal_store::{InMemoryCredentialStore, StoreBackend};
use std::net::TcpListener;
use std::sync::Arc;
use user_service::UserService;

/// Identity service running in substitute mode on 127.0.0.1.
pub struct IdentityHarness {
    pub base_url: String,
    pub issuer: web::Data<TokenIssuer>,
}

impl IdentityHarness {
    /// Must run inside an actix system (`#[actix_web::test]`).
    pub async fn start() -> Self {
        let issuer = web::Data::new(substitute_issuer());
        issuer
            .seed_demo_accounts()
            .await
            .expect("Failed to seed demo accounts");

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test port");
        let port = listener.local_addr().expect("No local addr").port();
        let server = startup::run(listener, issuer.clone()).expect("Failed to start server");
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            issuer,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let issued = self
            .issuer
            .login(email, password)
            .await
            .expect("Demo login failed");
        (issued.token, issued.user_id)
    }

    pub fn remote_validator(&self) -> Validator {
        remote_validator_for(&self.base_url)
    }
}

pub fn remote_validator_for(base_url: &str) -> Validator {
    Validator::Remote(
        RemoteValidator::new(RemoteValidatorConfig {
            base_url: base_url.to_string(),
            timeout: std::time::Duration::from_secs(5),
        })
        .expect("Failed to build remote validator"),
    )
}

/// Issuer wired the way identity-service wires it without configuration.
pub fn substitute_issuer() -> TokenIssuer {
    TokenIssuer::new(
        Arc::new(StoreBackend::Substitute(InMemoryCredentialStore::new())),
        fallback_keys(),
        Duration::hours(24),
    )
}

pub fn fallback_keys() -> Arc<JwtKeys> {
    Arc::new(JwtKeys::from_secret(DEV_FALLBACK_SECRET.as_bytes()))
}

pub fn local_validator() -> Validator {
    Validator::Local(LocalValidator::new(fallback_keys()))
}

/// User records as user-service substitute mode seeds them.
pub fn seeded_users() -> web::Data<UserService> {
    web::Data::new(UserService::new(Arc::new(StoreBackend::Substitute(
        InMemoryCredentialStore::with_records(demo_profiles(chrono::Utc::now())),
    ))))
}

/// A local port nothing listens on.
pub fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test port");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
