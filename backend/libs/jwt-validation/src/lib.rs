//! Bearer-token validation for resource services
//!
//! [`TokenValidator`] has two implementations with identical outcomes:
//! - [`LocalValidator`]: HS256 verification in-process with the shared secret
//! - [`RemoteValidator`]: delegates to the identity service over HTTP, bounded
//!   by a timeout
//!
//! Routine invalidity (malformed, expired, wrong signature, empty) is a
//! [`ValidationOutcome`] with `valid == false`. Only failures to reach a
//! verdict are [`ValidationError`]s.

mod error;
mod local;
mod outcome;
mod remote;

use async_trait::async_trait;

pub use error::ValidationError;
pub use local::LocalValidator;
pub use outcome::ValidationOutcome;
pub use remote::{RemoteValidator, RemoteValidatorConfig};

#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<ValidationOutcome, ValidationError>;
}

/// Validator selected at startup
#[derive(Debug)]
pub enum Validator {
    Local(LocalValidator),
    Remote(RemoteValidator),
}

#[async_trait]
impl TokenValidator for Validator {
    async fn validate(&self, token: &str) -> Result<ValidationOutcome, ValidationError> {
        if token.is_empty() {
            return Ok(ValidationOutcome::invalid());
        }

        match self {
            Validator::Local(v) => v.validate(token).await,
            Validator::Remote(v) => v.validate(token).await,
        }
    }
}
