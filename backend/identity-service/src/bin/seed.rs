//! Database seed script for the demo accounts
//! Run with: cargo run --bin seed
//!
//! Uses the same environment as the service (`DATABASE_URL`, `JWT_SECRET`).
//! Accounts whose email already exists are skipped.

use anyhow::{Context, Result};
use identity_service::{config::Settings, seed};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "identity_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    let settings = Settings::load().context("Failed to load configuration")?;
    let created = seed::seed_live_store(&settings).await?;

    info!(created, "Seeding finished");
    Ok(())
}
