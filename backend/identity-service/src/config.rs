//! Configuration management for Identity Service
//!
//! Loads settings from environment variables, with a `.env` file honoured in
//! debug builds.
//!
//! # Example
//!
//! ```no_run
//! use identity_service::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("listening on {}", settings.server.bind_address());
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use crypto_core::resolve_signing_secret;
use principal_store::DbConfig;
use service_common::env_flag;
use std::env;
use std::fmt;
use tracing::{info, warn};

const SERVICE_NAME: &str = "identity-service";

/// Upper bound on `JWT_EXPIRATION_SECS`: 30 days
pub const MAX_TOKEN_TTL_SECS: i64 = 30 * 24 * 3600;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub jwt: JwtSettings,
    /// In-memory store seeded with demo accounts instead of PostgreSQL
    pub use_substitutes: bool,
    /// `None` in substitute mode
    pub database: Option<DbConfig>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        let use_substitutes = env_flag("USE_MOCK_SERVICES");
        if env_flag("BYPASS_AUTH") {
            // Issuance has nothing to bypass; the flag only affects user-service
            warn!("BYPASS_AUTH has no effect on identity-service");
        }

        let database = if use_substitutes {
            info!("USE_MOCK_SERVICES set; using the in-memory credential store");
            None
        } else {
            Some(
                DbConfig::from_env(SERVICE_NAME)
                    .map_err(anyhow::Error::msg)
                    .context("Live mode requires a database")?,
            )
        };

        Ok(Settings {
            server: ServerSettings::from_env()?,
            jwt: JwtSettings::from_env(use_substitutes)?,
            use_substitutes,
            database,
        })
    }
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("AUTH_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("AUTH_SERVICE_PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .context("Invalid AUTH_SERVICE_PORT")?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Token signing settings
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub expiration_secs: i64,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"[REDACTED]")
            .field("expiration_secs", &self.expiration_secs)
            .finish()
    }
}

impl JwtSettings {
    fn from_env(allow_insecure: bool) -> Result<Self> {
        let secret = resolve_signing_secret(env::var("JWT_SECRET").ok(), allow_insecure)
            .context("Invalid JWT configuration")?;

        let expiration_secs: i64 = env::var("JWT_EXPIRATION_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .context("Invalid JWT_EXPIRATION_SECS")?;
        anyhow::ensure!(
            (1..=MAX_TOKEN_TTL_SECS).contains(&expiration_secs),
            "JWT_EXPIRATION_SECS must be between 1 and {MAX_TOKEN_TTL_SECS}"
        );

        Ok(Self {
            secret,
            expiration_secs,
        })
    }
}
