//! Composition root: picks the credential store and builds the HTTP server.

use crate::config::Settings;
use crate::routes;
use crate::services::TokenIssuer;
use actix_middleware::RequestLogging;
use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::{Context, Result};
use chrono::Duration;
use crypto_core::JwtKeys;
use principal_store::{pool, InMemoryCredentialStore, PgCredentialStore, StoreBackend};
use std::net::TcpListener;
use std::sync::Arc;
use tracing::info;

/// Live mode: PostgreSQL. Substitute mode: in-memory, seeded with the demo
/// accounts.
pub async fn build_issuer(settings: &Settings) -> Result<TokenIssuer> {
    let store = match &settings.database {
        Some(db) if !settings.use_substitutes => {
            let pg = pool::create_pool(db)
                .await
                .context("Failed to connect to PostgreSQL")?;
            pool::run_migrations(&pg)
                .await
                .context("Failed to run database migrations")?;
            StoreBackend::Live(PgCredentialStore::new(pg))
        }
        _ => StoreBackend::Substitute(InMemoryCredentialStore::new()),
    };
    info!(store = store.kind(), "credential store ready");

    let keys = Arc::new(JwtKeys::from_secret(settings.jwt.secret.as_bytes()));
    let token_ttl = Duration::try_seconds(settings.jwt.expiration_secs)
        .context("JWT_EXPIRATION_SECS out of range")?;
    let issuer = TokenIssuer::new(Arc::new(store), keys, token_ttl);

    if settings.use_substitutes {
        issuer
            .seed_demo_accounts()
            .await
            .context("Failed to seed demo accounts")?;
    }

    Ok(issuer)
}

/// Start serving on an already-bound listener.
pub fn run(listener: TcpListener, issuer: web::Data<TokenIssuer>) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(issuer.clone())
            .wrap(RequestLogging)
            .configure(routes::configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
