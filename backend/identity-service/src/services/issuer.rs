//! Token issuance
//!
//! Registers principals, authenticates email + password, and mints HS256
//! tokens. Verification reuses the same local check resource services run,
//! so both validation paths agree on every token.

use crate::error::{IdentityError, Result};
use crate::security::{hash_password, verify_password, verify_unknown_principal};
use crate::validators::{validate_login, validate_registration};
use chrono::Duration;
use crypto_core::JwtKeys;
use jwt_validation::{LocalValidator, ValidationOutcome};
use principal_store::fixtures::DEMO_ACCOUNTS;
use principal_store::{CredentialStore, NewPrincipal, StoreBackend, StoreError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub user_id: String,
}

pub struct TokenIssuer {
    store: Arc<StoreBackend>,
    keys: Arc<JwtKeys>,
    verifier: LocalValidator,
    token_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(store: Arc<StoreBackend>, keys: Arc<JwtKeys>, token_ttl: Duration) -> Self {
        Self {
            store,
            verifier: LocalValidator::new(keys.clone()),
            keys,
            token_ttl,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Create a principal; `AlreadyExists` when the email is taken.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<String> {
        validate_registration(email, password, name)?;

        if self.store.find_by_email(email).await?.is_some() {
            debug!(%email, "registration rejected: email taken");
            return Err(IdentityError::AlreadyExists);
        }

        let password_hash = hash_off_thread(password.to_string()).await?;
        // A concurrent registration can still win the race; the store reports it
        let principal = self
            .store
            .create(NewPrincipal::new(email, password_hash, name.trim()))
            .await?;

        info!(user_id = %principal.id, "principal registered");
        Ok(principal.id)
    }

    /// Check credentials, returning the principal id.
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`,
    /// after the same amount of hashing work.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        let password = password.to_string();
        let Some(principal) = self.store.find_by_email(email).await? else {
            tokio::task::spawn_blocking(move || verify_unknown_principal(&password))
                .await
                .map_err(|e| IdentityError::Internal(format!("verification task failed: {e}")))?;
            debug!("authentication failed: unknown email");
            return Err(IdentityError::InvalidCredentials);
        };

        let stored_hash = principal.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| IdentityError::Internal(format!("verification task failed: {e}")))??;

        if !matches {
            debug!(user_id = %principal.id, "authentication failed: wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        Ok(principal.id)
    }

    /// Sign a token for `principal_id` valid for the configured lifetime.
    pub fn issue_token(&self, principal_id: &str) -> Result<String> {
        crypto_core::issue_token(&self.keys, principal_id, self.token_ttl)
            .map_err(|e| IdentityError::Internal(e.to_string()))
    }

    /// Same verdict as a local validator holding the shared secret.
    pub fn verify_token(&self, token: &str) -> ValidationOutcome {
        self.verifier.check(token)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken> {
        validate_login(email, password)?;

        let user_id = self.authenticate(email, password).await?;
        let token = self.issue_token(&user_id)?;
        info!(%user_id, "login succeeded");

        Ok(IssuedToken { token, user_id })
    }

    /// Register the demo accounts under their fixed ids. Existing ones are
    /// left alone, so this is safe to call more than once.
    pub async fn seed_demo_accounts(&self) -> Result<usize> {
        let mut created = 0;
        for account in DEMO_ACCOUNTS {
            let password_hash = hash_off_thread(account.password.to_string()).await?;
            let new = NewPrincipal::new(account.email, password_hash, account.name)
                .with_id(account.id);

            match self.store.create(new).await {
                Ok(_) => created += 1,
                Err(StoreError::EmailTaken | StoreError::IdTaken) => {
                    warn!(email = account.email, "demo account already present");
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(created, "demo accounts seeded");
        Ok(created)
    }
}

/// Argon2 is deliberately slow; keep it off the async workers.
async fn hash_off_thread(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| IdentityError::Internal(format!("hashing task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crypto_core::jwt::{encode_claims, Claims};
    use principal_store::InMemoryCredentialStore;

    const SECRET: &[u8] = b"issuer-unit-test-secret-0123456789abcdef";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            Arc::new(StoreBackend::Substitute(InMemoryCredentialStore::new())),
            Arc::new(JwtKeys::from_secret(SECRET)),
            Duration::hours(24),
        )
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let issuer = issuer();
        let id = issuer
            .register("alice@example.com", "wonderland", "Alice")
            .await
            .unwrap();

        let issued = issuer.login("alice@example.com", "wonderland").await.unwrap();
        assert_eq!(issued.user_id, id);
        assert_eq!(issuer.verify_token(&issued.token), ValidationOutcome::valid(id));
    }

    #[tokio::test]
    async fn test_register_duplicate_keeps_first() {
        let issuer = issuer();
        let first = issuer
            .register("dup@example.com", "password1", "First")
            .await
            .unwrap();

        let err = issuer
            .register("dup@example.com", "password2", "Second")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::AlreadyExists));

        // First principal still authenticates with its own password
        assert_eq!(
            issuer.authenticate("dup@example.com", "password1").await.unwrap(),
            first
        );
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let issuer = issuer();
        for (email, password, name) in [
            ("", "password1", "N"),
            ("bad", "password1", "N"),
            ("ok@example.com", "short", "N"),
            ("ok@example.com", "password1", ""),
        ] {
            let err = issuer.register(email, password, name).await.unwrap_err();
            assert!(matches!(err, IdentityError::InvalidArgument(_)));
        }
    }

    #[tokio::test]
    async fn test_uniform_credential_failure() {
        let issuer = issuer();
        issuer
            .register("bob@example.com", "builder1", "Bob")
            .await
            .unwrap();

        let unknown = issuer
            .authenticate("nobody@example.com", "builder1")
            .await
            .unwrap_err();
        let wrong = issuer
            .authenticate("bob@example.com", "builder2")
            .await
            .unwrap_err();

        assert!(matches!(unknown, IdentityError::InvalidCredentials));
        assert!(matches!(wrong, IdentityError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_unknown_email_rejected_for_any_password() {
        let issuer = issuer();
        for password in ["unknown-principal", "builder1", ""] {
            let err = issuer
                .authenticate("ghost@example.com", password)
                .await
                .unwrap_err();
            assert!(matches!(err, IdentityError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let err = issuer().login("", "").await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidArgument(_)));
    }

    #[test]
    fn test_issued_token_lifetime() {
        let issuer = issuer();
        let token = issuer.issue_token("principal-1").unwrap();
        let claims = crypto_core::validate_token(&JwtKeys::from_secret(SECRET), &token).unwrap();

        assert_eq!(claims.sub, "principal-1");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_unrepresentable_lifetime_is_internal_error() {
        let issuer = TokenIssuer::new(
            Arc::new(StoreBackend::Substitute(InMemoryCredentialStore::new())),
            Arc::new(JwtKeys::from_secret(SECRET)),
            Duration::days(1_000_000_000),
        );

        assert!(matches!(
            issuer.issue_token("principal-1"),
            Err(IdentityError::Internal(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_and_foreign() {
        let issuer = issuer();
        let expired = encode_claims(
            &JwtKeys::from_secret(SECRET),
            &Claims::new("principal-1", Utc::now() - Duration::days(2), Duration::days(1)).unwrap(),
        )
        .unwrap();
        let foreign =
            crypto_core::issue_token(&JwtKeys::from_secret(b"other"), "principal-1", Duration::hours(1))
                .unwrap();

        assert_eq!(issuer.verify_token(&expired), ValidationOutcome::invalid());
        assert_eq!(issuer.verify_token(&foreign), ValidationOutcome::invalid());
        assert_eq!(issuer.verify_token(""), ValidationOutcome::invalid());
    }

    #[tokio::test]
    async fn test_seed_demo_accounts_idempotent() {
        let issuer = issuer();
        assert_eq!(issuer.seed_demo_accounts().await.unwrap(), 3);
        assert_eq!(issuer.seed_demo_accounts().await.unwrap(), 0);

        let issued = issuer.login("admin@example.com", "admin123").await.unwrap();
        assert_eq!(issued.user_id, "00000000-0000-0000-0000-000000000001");
    }
}
