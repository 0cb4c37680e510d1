use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Stored principal record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; the password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

impl NewPrincipal {
    /// New record with a freshly generated id.
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            password_hash: password_hash.into(),
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct PrincipalUpdate {
    pub name: String,
    pub email: String,
}

/// Normalised page request.
///
/// `page` below 1 becomes 1; `page_size` outside `1..=100` becomes 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let page_size = match u32::try_from(page_size) {
            Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => size,
            _ => DEFAULT_PAGE_SIZE,
        };
        Self { page, page_size }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, i64::from(DEFAULT_PAGE_SIZE))
    }
}

/// One page of results plus the total across all pages
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
