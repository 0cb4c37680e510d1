//! Token primitives shared by the identity and user services.
//!
//! ## Modules
//! - `jwt`: HS256 claims, signing keys, issue and verify
//! - `secret`: signing-secret strength classification

pub mod jwt;
pub mod secret;

pub use jwt::{issue_token, validate_token, Claims, JwtError, JwtKeys};
pub use secret::{
    classify_secret, resolve_signing_secret, SecretPolicyError, SecretStrength,
    DEV_FALLBACK_SECRET,
};
