/// HS256 token signing and verification.
///
/// Keys are held by an explicitly constructed [`JwtKeys`] value. The process
/// that owns the secret builds one at startup and shares it by `Arc`; there is
/// no global key slot.
///
/// ## Validity
///
/// A token is valid only when the HS256 signature verifies and the current
/// time is strictly before `exp`. No clock-skew leeway is granted, and tokens
/// signed with any other algorithm are rejected.
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Only HS256 is accepted
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims carried by every token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// `LifetimeOutOfRange` when `issued_at + ttl` is not a representable time.
    pub fn new(
        subject: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(JwtError::LifetimeOutOfRange)?;

        Ok(Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token rejected: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("token has an empty subject")]
    EmptySubject,

    #[error("token lifetime out of range")]
    LifetimeOutOfRange,
}

/// Signing and verification keys derived from one shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("algorithm", &JWT_ALGORITHM)
            .finish_non_exhaustive()
    }
}

/// Sign a token for `subject`, valid for `ttl` from now.
pub fn issue_token(keys: &JwtKeys, subject: &str, ttl: Duration) -> Result<String, JwtError> {
    encode_claims(keys, &Claims::new(subject, Utc::now(), ttl)?)
}

/// Sign arbitrary claims with HS256.
pub fn encode_claims(keys: &JwtKeys, claims: &Claims) -> Result<String, JwtError> {
    encode(&Header::new(JWT_ALGORITHM), claims, &keys.encoding).map_err(JwtError::Signing)
}

/// Verify signature and expiry, returning the claims on success.
///
/// Every failure is reported as a [`JwtError`]; callers that only need a
/// yes/no answer should treat any error as "invalid".
pub fn validate_token(keys: &JwtKeys, token: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(token, &keys.decoding, &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Rejected(e),
        })?
        .claims;

    // jsonwebtoken accepts exp == now; a token is only valid strictly before exp
    if claims.exp <= Utc::now().timestamp() {
        return Err(JwtError::Expired);
    }

    if claims.sub.is_empty() {
        return Err(JwtError::EmptySubject);
    }

    Ok(claims)
}
