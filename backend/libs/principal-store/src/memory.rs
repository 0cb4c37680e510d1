//! In-memory substitute store
//!
//! A single `RwLock` guards the whole map. Reads share the lock; create,
//! update and delete hold the write guard across the uniqueness check and the
//! write so two callers can never claim the same email.

use crate::{
    CredentialStore, NewPrincipal, Page, PageRequest, Principal, PrincipalUpdate, Result,
    StoreError,
};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<String, Principal>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with complete records (timestamps kept as given).
    pub fn with_records(records: impl IntoIterator<Item = Principal>) -> Self {
        let records = records
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect::<HashMap<_, _>>();
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

fn email_in_use(records: &HashMap<String, Principal>, email: &str, except: Option<&str>) -> bool {
    records
        .values()
        .any(|p| p.email == email && Some(p.id.as_str()) != except)
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, new: NewPrincipal) -> Result<Principal> {
        let mut records = self.records.write();
        if email_in_use(&records, &new.email, None) {
            return Err(StoreError::EmailTaken);
        }
        if records.contains_key(&new.id) {
            return Err(StoreError::IdTaken);
        }

        let now = Utc::now();
        let principal = Principal {
            id: new.id,
            email: new.email,
            password_hash: new.password_hash,
            name: new.name,
            created_at: now,
            updated_at: now,
        };
        records.insert(principal.id.clone(), principal.clone());
        tracing::debug!(user_id = %principal.id, "in-memory principal created");
        Ok(principal)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Principal>> {
        Ok(self.records.read().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>> {
        Ok(self
            .records
            .read()
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn update(&self, id: &str, changes: PrincipalUpdate) -> Result<Principal> {
        let mut records = self.records.write();
        if !records.contains_key(id) {
            return Err(StoreError::NotFound);
        }
        if email_in_use(&records, &changes.email, Some(id)) {
            return Err(StoreError::EmailTaken);
        }

        let principal = records.get_mut(id).ok_or(StoreError::NotFound)?;
        principal.name = changes.name;
        principal.email = changes.email;
        principal.updated_at = Utc::now();
        Ok(principal.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.records.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Principal>> {
        let records = self.records.read();
        let mut all: Vec<&Principal> = records.values().collect();
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = all.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = all
            .into_iter()
            .skip(offset)
            .take(page.page_size() as usize)
            .cloned()
            .collect();

        Ok(Page { items, total })
    }
}
