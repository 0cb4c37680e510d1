//! User service configuration, read once at startup.

use anyhow::{Context, Result};
use crypto_core::resolve_signing_secret;
use jwt_validation::RemoteValidatorConfig;
use principal_store::DbConfig;
use service_common::ServiceMode;
use std::env;
use std::fmt;

const SERVICE_NAME: &str = "user-service";

#[derive(Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub mode: ServiceMode,
    /// Shared signing secret; only the local validator needs it
    pub jwt_secret: Option<String>,
    /// Identity service endpoint for remote validation
    pub auth_service: RemoteValidatorConfig,
    /// `None` in substitute modes
    pub database: Option<DbConfig>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("server", &self.server)
            .field("mode", &self.mode)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("auth_service", &self.auth_service)
            .field("database", &self.database)
            .finish()
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        let mode = ServiceMode::from_env();

        let jwt_secret = match mode {
            ServiceMode::Substitute => Some(
                resolve_signing_secret(env::var("JWT_SECRET").ok(), true)
                    .context("Invalid JWT configuration")?,
            ),
            ServiceMode::Live | ServiceMode::SubstituteBypass => None,
        };

        let database = match mode {
            ServiceMode::Live => Some(
                DbConfig::from_env(SERVICE_NAME)
                    .map_err(anyhow::Error::msg)
                    .context("Live mode requires a database")?,
            ),
            ServiceMode::Substitute | ServiceMode::SubstituteBypass => None,
        };

        Ok(Settings {
            server: ServerSettings::from_env()?,
            mode,
            jwt_secret,
            auth_service: RemoteValidatorConfig::from_env(),
            database,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("USER_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("USER_SERVICE_PORT")
                .unwrap_or_else(|_| "8082".to_string())
                .parse()
                .context("Invalid USER_SERVICE_PORT")?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
