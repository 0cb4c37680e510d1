use crate::{TokenValidator, ValidationError, ValidationOutcome};
use async_trait::async_trait;
use crypto_core::{validate_token, JwtKeys};
use std::sync::Arc;

/// In-process HS256 verification against the shared secret.
#[derive(Debug, Clone)]
pub struct LocalValidator {
    keys: Arc<JwtKeys>,
}

impl LocalValidator {
    pub fn new(keys: Arc<JwtKeys>) -> Self {
        Self { keys }
    }

    /// Synchronous form; never fails.
    pub fn check(&self, token: &str) -> ValidationOutcome {
        if token.is_empty() {
            return ValidationOutcome::invalid();
        }

        match validate_token(&self.keys, token) {
            Ok(claims) => ValidationOutcome::valid(claims.sub),
            Err(e) => {
                tracing::debug!(error = %e, "token rejected");
                ValidationOutcome::invalid()
            }
        }
    }
}

#[async_trait]
impl TokenValidator for LocalValidator {
    async fn validate(&self, token: &str) -> Result<ValidationOutcome, ValidationError> {
        Ok(self.check(token))
    }
}
