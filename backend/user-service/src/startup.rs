//! Composition root
//!
//! The mode picked in [`Settings`] decides the store and the gateway here and
//! nowhere else; handlers and services see the same types in every mode.

use crate::config::Settings;
use crate::routes;
use crate::services::UserService;
use actix_middleware::{AuthGateway, RequestLogging};
use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::{Context, Result};
use service_common::ServiceMode;
use chrono::Utc;
use crypto_core::{JwtKeys, DEV_FALLBACK_SECRET};
use jwt_validation::{LocalValidator, RemoteValidator, Validator};
use principal_store::fixtures::demo_profiles;
use principal_store::{pool, InMemoryCredentialStore, PgCredentialStore, StoreBackend};
use std::net::TcpListener;
use std::sync::Arc;
use tracing::info;

/// Store and gateway for one mode
pub struct Components {
    pub users: UserService,
    pub gateway: AuthGateway,
}

pub async fn build(settings: &Settings) -> Result<Components> {
    let components = match settings.mode {
        ServiceMode::Live => {
            let db = settings
                .database
                .as_ref()
                .context("Live mode requires a database")?;
            let pg = pool::create_pool(db)
                .await
                .context("Failed to connect to PostgreSQL")?;
            pool::run_migrations(&pg)
                .await
                .context("Failed to run database migrations")?;

            let remote = RemoteValidator::new(settings.auth_service.clone())
                .context("Failed to build the identity service client")?;
            info!(endpoint = remote.endpoint(), "validating tokens remotely");

            Components {
                users: UserService::new(Arc::new(StoreBackend::Live(PgCredentialStore::new(pg)))),
                gateway: AuthGateway::enforce(Arc::new(Validator::Remote(remote))),
            }
        }
        ServiceMode::Substitute => {
            let secret = settings
                .jwt_secret
                .as_deref()
                .unwrap_or(DEV_FALLBACK_SECRET);
            let keys = Arc::new(JwtKeys::from_secret(secret.as_bytes()));

            Components {
                users: UserService::new(substitute_store()),
                gateway: AuthGateway::enforce(Arc::new(Validator::Local(LocalValidator::new(keys)))),
            }
        }
        ServiceMode::SubstituteBypass => Components {
            users: UserService::new(substitute_store()),
            gateway: AuthGateway::bypass(),
        },
    };

    info!(
        mode = %settings.mode,
        store = components.users.store_kind(),
        bypass = components.gateway.is_bypass(),
        "user service wired"
    );
    Ok(components)
}

fn substitute_store() -> Arc<StoreBackend> {
    let store = InMemoryCredentialStore::with_records(demo_profiles(Utc::now()));
    info!(records = store.len(), "seeded in-memory user store");
    Arc::new(StoreBackend::Substitute(store))
}

/// Start serving on an already-bound listener.
pub fn run(
    listener: TcpListener,
    users: web::Data<UserService>,
    gateway: AuthGateway,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let gateway = gateway.clone();
        App::new()
            .app_data(users.clone())
            .wrap(RequestLogging)
            .configure(|cfg| routes::configure(cfg, gateway))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
