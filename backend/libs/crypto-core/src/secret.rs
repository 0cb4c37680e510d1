//! Signing-secret strength classification
//!
//! HS256 secrets shorter than 256 bits, with low byte entropy, or built from
//! runs like "aaaa" / "1234" are classified as weak.

/// 256 bits
const MIN_SECRET_BYTES: usize = 32;
const STRONG_SECRET_BYTES: usize = 64;
const MIN_ENTROPY_BITS: f64 = 4.0;
const STRONG_ENTROPY_BITS: f64 = 5.0;
const MAX_RUN: usize = 4;

/// Fallback used only when insecure defaults are allowed (substitute mode),
/// so a substitute identity-service and user-service agree unconfigured.
pub const DEV_FALLBACK_SECRET: &str = "default-secret-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretStrength {
    Weak,
    Acceptable,
    Strong,
}

impl SecretStrength {
    pub fn is_weak(self) -> bool {
        self == SecretStrength::Weak
    }
}

pub fn classify_secret(secret: &str) -> SecretStrength {
    let bytes = secret.as_bytes();
    if bytes.len() < MIN_SECRET_BYTES {
        return SecretStrength::Weak;
    }

    let entropy = shannon_entropy(bytes);
    if entropy < MIN_ENTROPY_BITS || has_run(bytes) {
        return SecretStrength::Weak;
    }

    if bytes.len() >= STRONG_SECRET_BYTES && entropy >= STRONG_ENTROPY_BITS {
        SecretStrength::Strong
    } else {
        SecretStrength::Acceptable
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SecretPolicyError {
    #[error("JWT_SECRET must be set")]
    Missing,

    #[error("JWT_SECRET is too weak: use at least 32 random bytes")]
    Weak,
}

/// Pick the signing secret for this process.
///
/// With `allow_insecure` a missing secret falls back to
/// [`DEV_FALLBACK_SECRET`] and a weak one is only logged. Without it both are
/// errors.
pub fn resolve_signing_secret(
    configured: Option<String>,
    allow_insecure: bool,
) -> Result<String, SecretPolicyError> {
    let secret = match configured.filter(|s| !s.is_empty()) {
        Some(secret) => secret,
        None if allow_insecure => {
            tracing::warn!("JWT_SECRET not set; using the development fallback secret");
            DEV_FALLBACK_SECRET.to_string()
        }
        None => return Err(SecretPolicyError::Missing),
    };

    match classify_secret(&secret) {
        SecretStrength::Weak if allow_insecure => {
            tracing::warn!("JWT_SECRET is weak; acceptable only for local development");
        }
        SecretStrength::Weak => return Err(SecretPolicyError::Weak),
        SecretStrength::Acceptable => {
            tracing::info!("JWT_SECRET strength acceptable; 64+ bytes recommended");
        }
        SecretStrength::Strong => {}
    }

    Ok(secret)
}

/// Bits per byte, 0.0 to 8.0
fn shannon_entropy(data: &[u8]) -> f64 {
    let mut counts = [0usize; 256];
    for &b in data {
        counts[b as usize] += 1;
    }

    let len = data.len() as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Repeated ("aaaa") or ascending ("abcd") runs of `MAX_RUN` bytes.
fn has_run(data: &[u8]) -> bool {
    let mut repeated = 1;
    let mut ascending = 1;
    for pair in data.windows(2) {
        repeated = if pair[0] == pair[1] { repeated + 1 } else { 1 };
        ascending = if pair[0].wrapping_add(1) == pair[1] {
            ascending + 1
        } else {
            1
        };
        if repeated >= MAX_RUN || ascending >= MAX_RUN {
            return true;
        }
    }
    false
}
