//! Demo account seeding for the live PostgreSQL store.
//!
//! Substitute mode seeds itself at startup; this is for a fresh database.

use crate::config::Settings;
use crate::startup;
use anyhow::{ensure, Result};
use tracing::info;

/// Create the demo accounts that are not there yet; returns how many were
/// added. Refuses to run against the in-memory store.
pub async fn seed_live_store(settings: &Settings) -> Result<usize> {
    ensure!(
        !settings.use_substitutes && settings.database.is_some(),
        "seeding targets the live database; unset USE_MOCK_SERVICES and set DATABASE_URL"
    );

    let issuer = startup::build_issuer(settings).await?;
    let created = issuer.seed_demo_accounts().await?;
    info!(created, "live store seeded");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JwtSettings, ServerSettings};

    fn substitute_settings() -> Settings {
        Settings {
            server: ServerSettings {
                host: "127.0.0.1".into(),
                port: 0,
            },
            jwt: JwtSettings {
                secret: crypto_core::DEV_FALLBACK_SECRET.into(),
                expiration_secs: 3600,
            },
            use_substitutes: true,
            database: None,
        }
    }

    #[tokio::test]
    async fn test_refuses_substitute_mode() {
        let err = seed_live_store(&substitute_settings()).await.unwrap_err();
        assert!(err.to_string().contains("live database"));
    }
}
