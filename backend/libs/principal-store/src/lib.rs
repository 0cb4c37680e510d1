//! Principal record storage
//!
//! One [`CredentialStore`] contract with two implementations:
//! - `PgCredentialStore`: PostgreSQL via sqlx
//! - `InMemoryCredentialStore`: lock-guarded map for substitute mode
//!
//! Services hold a [`StoreBackend`] so request handling is identical in both
//! modes; the variant is picked once at startup.

mod error;
pub mod fixtures;
mod memory;
mod model;
pub mod pool;
mod postgres;

use async_trait::async_trait;

pub use error::StoreError;
pub use memory::InMemoryCredentialStore;
pub use model::{NewPrincipal, Page, PageRequest, Principal, PrincipalUpdate};
pub use pool::DbConfig;
pub use postgres::PgCredentialStore;

pub type Result<T> = std::result::Result<T, StoreError>;

/// CRUD and pagination over principal records.
///
/// Email uniqueness is enforced on `create` and on `update`; a clash is
/// reported as [`StoreError::EmailTaken`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create(&self, principal: NewPrincipal) -> Result<Principal>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Principal>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>>;

    /// Replace name and email. `NotFound` if `id` is unknown.
    async fn update(&self, id: &str, changes: PrincipalUpdate) -> Result<Principal>;

    /// `NotFound` if `id` is unknown.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Newest first (`created_at` descending, then id).
    async fn list(&self, page: PageRequest) -> Result<Page<Principal>>;
}

/// Store selected at startup
pub enum StoreBackend {
    Live(PgCredentialStore),
    Substitute(InMemoryCredentialStore),
}

impl StoreBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreBackend::Live(_) => "postgres",
            StoreBackend::Substitute(_) => "in-memory",
        }
    }
}

#[async_trait]
impl CredentialStore for StoreBackend {
    async fn create(&self, principal: NewPrincipal) -> Result<Principal> {
        match self {
            StoreBackend::Live(store) => store.create(principal).await,
            StoreBackend::Substitute(store) => store.create(principal).await,
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Principal>> {
        match self {
            StoreBackend::Live(store) => store.find_by_id(id).await,
            StoreBackend::Substitute(store) => store.find_by_id(id).await,
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>> {
        match self {
            StoreBackend::Live(store) => store.find_by_email(email).await,
            StoreBackend::Substitute(store) => store.find_by_email(email).await,
        }
    }

    async fn update(&self, id: &str, changes: PrincipalUpdate) -> Result<Principal> {
        match self {
            StoreBackend::Live(store) => store.update(id, changes).await,
            StoreBackend::Substitute(store) => store.update(id, changes).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self {
            StoreBackend::Live(store) => store.delete(id).await,
            StoreBackend::Substitute(store) => store.delete(id).await,
        }
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Principal>> {
        match self {
            StoreBackend::Live(store) => store.list(page).await,
            StoreBackend::Substitute(store) => store.list(page).await,
        }
    }
}
