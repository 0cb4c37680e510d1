use actix_web::web;
use anyhow::{Context, Result};
use std::net::TcpListener;
use tracing::info;
use user_service::{config::Settings, startup};

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "user_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting User Service");

    let settings = Settings::load().context("Failed to load configuration")?;
    info!(mode = %settings.mode, "Configuration loaded");

    let components = startup::build(&settings).await?;

    let address = settings.server.bind_address();
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}"))?;
    info!(%address, "User service listening");

    startup::run(listener, web::Data::new(components.users), components.gateway)?
        .await
        .context("HTTP server error")?;

    info!("User service shut down");
    Ok(())
}
