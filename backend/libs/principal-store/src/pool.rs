//! PostgreSQL pool configuration and creation

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::fmt;
use std::time::Duration;
use tracing::{error, info};

#[derive(Clone)]
pub struct DbConfig {
    /// Used as a log label
    pub service_name: String,
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Timeout for the startup `SELECT 1` probe
    pub connect_timeout_secs: u64,
    /// Timeout for getting a connection from the pool
    pub acquire_timeout_secs: u64,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("service_name", &self.service_name)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            service_name: String::from("unknown"),
            database_url: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 5,
            acquire_timeout_secs: 10,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl DbConfig {
    /// Read `DATABASE_URL` (required) and `DB_*` overrides.
    pub fn from_env(service_name: &str) -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable not set".to_string())?;
        let defaults = Self::default();

        Ok(Self {
            service_name: service_name.to_string(),
            database_url,
            max_connections: env_or("DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: env_or("DB_MIN_CONNECTIONS", defaults.min_connections),
            connect_timeout_secs: env_or("DB_CONNECT_TIMEOUT_SECS", defaults.connect_timeout_secs),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout_secs),
        })
    }
}

/// Build the pool and verify it with a bounded `SELECT 1`.
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .test_before_acquire(true)
        .connect(&config.database_url)
        .await?;

    match tokio::time::timeout(
        Duration::from_secs(config.connect_timeout_secs),
        sqlx::query("SELECT 1").execute(&pool),
    )
    .await
    {
        Ok(Ok(_)) => {
            info!(
                service = %config.service_name,
                max_connections = config.max_connections,
                "Database pool created and verified"
            );
            Ok(pool)
        }
        Ok(Err(e)) => {
            error!(service = %config.service_name, error = %e, "Database verification failed");
            Err(e)
        }
        Err(_) => {
            error!(
                service = %config.service_name,
                timeout_secs = config.connect_timeout_secs,
                "Database verification timed out"
            );
            Err(sqlx::Error::PoolTimedOut)
        }
    }
}

/// Apply the embedded `users` migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("principal-store migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB_VARS: [&str; 4] = [
        "DB_MAX_CONNECTIONS",
        "DB_MIN_CONNECTIONS",
        "DB_CONNECT_TIMEOUT_SECS",
        "DB_ACQUIRE_TIMEOUT_SECS",
    ];

    #[test]
    #[serial_test::serial]
    fn test_from_env_requires_database_url() {
        std::env::remove_var("DATABASE_URL");
        assert!(DbConfig::from_env("user-service").is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_defaults_and_overrides() {
        for var in DB_VARS {
            std::env::remove_var(var);
        }
        std::env::set_var("DATABASE_URL", "postgres://localhost/test");

        let config = DbConfig::from_env("user-service").unwrap();
        assert_eq!(config.service_name, "user-service");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout_secs, 10);

        std::env::set_var("DB_MAX_CONNECTIONS", "4");
        std::env::set_var("DB_MIN_CONNECTIONS", "not-a-number");
        let config = DbConfig::from_env("user-service").unwrap();
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 2);

        for var in DB_VARS {
            std::env::remove_var(var);
        }
        std::env::remove_var("DATABASE_URL");
    }

    #[test]
    fn test_debug_redacts_url() {
        let config = DbConfig {
            database_url: "postgres://admin:hunter2@db/users".into(),
            ..DbConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
