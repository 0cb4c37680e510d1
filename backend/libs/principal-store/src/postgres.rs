//! PostgreSQL-backed credential store

use crate::{
    CredentialStore, NewPrincipal, Page, PageRequest, Principal, PrincipalUpdate, Result,
    StoreError,
};
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, email, password_hash, name, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, new: NewPrincipal) -> Result<Principal> {
        let sql = format!(
            "INSERT INTO users (id, email, password_hash, name, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Principal>(&sql)
            .bind(&new.id)
            .bind(&new.email)
            .bind(&new.password_hash)
            .bind(&new.name)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from_write)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Principal>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let principal = sqlx::query_as::<_, Principal>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(principal)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        let principal = sqlx::query_as::<_, Principal>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(principal)
    }

    async fn update(&self, id: &str, changes: PrincipalUpdate) -> Result<Principal> {
        let sql = format!(
            "UPDATE users SET name = $2, email = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Principal>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_write)?
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Principal>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id ASC LIMIT $1 OFFSET $2"
        );
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let items = sqlx::query_as::<_, Principal>(&sql)
            .bind(i64::from(page.page_size()))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or(0),
        })
    }
}
