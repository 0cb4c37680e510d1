/// Identity Service Main Entry Point
///
/// Starts the HTTP issuance API with either the PostgreSQL credential store
/// or, with `USE_MOCK_SERVICES=true`, the in-memory substitute.
use actix_web::web;
use anyhow::{Context, Result};
use identity_service::{config::Settings, startup};
use std::net::TcpListener;
use tracing::info;

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "identity_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting Identity Service");

    let settings = Settings::load().context("Failed to load configuration")?;
    info!(
        use_substitutes = settings.use_substitutes,
        token_ttl_secs = settings.jwt.expiration_secs,
        "Configuration loaded"
    );

    let issuer = startup::build_issuer(&settings).await?;

    let address = settings.server.bind_address();
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}"))?;
    info!(%address, "Identity service listening");

    startup::run(listener, web::Data::new(issuer))?
        .await
        .context("HTTP server error")?;

    info!("Identity service shut down");
    Ok(())
}
