/// Password hashing and verification using Argon2id
use crate::error::{IdentityError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

/// Stand-in hash for lookups that found no principal, built with the same
/// parameters as stored hashes so both paths cost one Argon2 verification.
static UNKNOWN_PRINCIPAL_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("unknown-principal").ok());

/// Hash a password with Argon2id and a random 16-byte salt.
///
/// Returns a PHC string (`$argon2id$v=19$...`) safe for storage. Strength
/// rules are enforced by `validators` before this is called.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| IdentityError::Internal(format!("password hashing failed: {e}")))
}

/// Check `password` against a stored PHC hash in constant time.
///
/// `Ok(false)` on mismatch. A hash that does not parse is an internal error,
/// never a credential failure.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| IdentityError::Internal(format!("invalid password hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(IdentityError::Internal(format!(
            "password verification failed: {e}"
        ))),
    }
}

/// Run a full verification for an email with no principal behind it.
///
/// Always `false`, whatever the password.
pub fn verify_unknown_principal(password: &str) -> bool {
    if let Some(hash) = UNKNOWN_PRINCIPAL_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
    false
}
