use std::time::Duration;
use thiserror::Error;

/// The validator could not reach a verdict.
///
/// Distinct from an invalid token: callers answer these with a 5xx, not 401.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("token validation timed out after {0:?}")]
    Timeout(Duration),

    #[error("identity service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("identity service returned HTTP {0}")]
    Upstream(u16),

    #[error("malformed validation response: {0}")]
    Decode(#[source] reqwest::Error),
}
