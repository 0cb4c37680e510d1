//! User record operations
//!
//! The caller's principal comes from the gateway. Mutations check ownership
//! before looking the record up, so a non-owner learns nothing about which
//! ids exist.

use crate::authz::{authorize_mutation, Mutation};
use crate::error::{AppError, Result};
use crate::validators::validate_profile_update;
use actix_middleware::AuthPrincipal;
use principal_store::{CredentialStore, Page, PageRequest, Principal, PrincipalUpdate, StoreBackend};
use std::sync::Arc;
use tracing::info;

pub struct UserService {
    store: Arc<StoreBackend>,
}

impl UserService {
    pub fn new(store: Arc<StoreBackend>) -> Self {
        Self { store }
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub async fn get(&self, id: &str) -> Result<Principal> {
        self.store.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// Replace name and email; `AlreadyExists` if the email belongs to
    /// another record.
    pub async fn update(
        &self,
        principal: &AuthPrincipal,
        id: &str,
        name: &str,
        email: &str,
    ) -> Result<Principal> {
        authorize_mutation(principal, id, Mutation::Update)?;
        validate_profile_update(name, email)?;

        let updated = self
            .store
            .update(
                id,
                PrincipalUpdate {
                    name: name.trim().to_string(),
                    email: email.to_string(),
                },
            )
            .await?;

        info!(user_id = %id, by = %principal, "user updated");
        Ok(updated)
    }

    pub async fn delete(&self, principal: &AuthPrincipal, id: &str) -> Result<()> {
        authorize_mutation(principal, id, Mutation::Delete)?;
        self.store.delete(id).await?;

        info!(user_id = %id, by = %principal, "user deleted");
        Ok(())
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Principal>> {
        Ok(self.store.list(page).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use principal_store::fixtures::{demo_id, demo_profiles};
    use principal_store::InMemoryCredentialStore;

    fn service() -> UserService {
        UserService::new(Arc::new(StoreBackend::Substitute(
            InMemoryCredentialStore::with_records(demo_profiles(Utc::now())),
        )))
    }

    fn user(n: u32) -> AuthPrincipal {
        AuthPrincipal::User(demo_id(n))
    }

    #[tokio::test]
    async fn test_get_existing_and_missing() {
        let svc = service();
        assert_eq!(svc.get(&demo_id(1)).await.unwrap().email, "admin@example.com");
        assert!(matches!(svc.get("missing").await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_owner_updates_own_record() {
        let svc = service();
        let updated = svc
            .update(&user(2), &demo_id(2), " Renamed ", "renamed@example.com")
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, "renamed@example.com");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_non_owner_update_denied_and_record_unchanged() {
        let svc = service();
        let err = svc
            .update(&user(3), &demo_id(2), "Mallory", "mallory@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
        assert_eq!(svc.get(&demo_id(2)).await.unwrap().name, "Regular User");
    }

    #[tokio::test]
    async fn test_denied_before_not_found() {
        let svc = service();
        let err = svc.delete(&user(1), "no-such-user").await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn test_update_email_conflict() {
        let svc = service();
        let err = svc
            .update(&user(2), &demo_id(2), "Regular User", "admin@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_update_validation() {
        let svc = service();
        let err = svc
            .update(&user(2), &demo_id(2), "", "user@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_bypass_deletes_any_record() {
        let svc = service();
        svc.delete(&AuthPrincipal::Bypass, &demo_id(5)).await.unwrap();
        assert!(matches!(svc.get(&demo_id(5)).await, Err(AppError::NotFound)));

        let err = svc.delete(&AuthPrincipal::Bypass, &demo_id(5)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_list_pages() {
        let svc = service();
        let page = svc.list(PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 20);

        let page = svc.list(PageRequest::new(2, 15)).await.unwrap();
        assert_eq!(page.items.len(), 5);
    }
}
