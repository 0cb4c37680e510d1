/// Integration tests for crypto-core JWT functionality
///
/// This test module covers:
/// - Tokens crossing between independently built keys
/// - Secret resolution feeding key construction
/// - Expiry at the exact boundary
use chrono::{Duration, Utc};
use crypto_core::jwt::encode_claims;
use crypto_core::{
    issue_token, resolve_signing_secret, validate_token, Claims, JwtError, JwtKeys,
    DEV_FALLBACK_SECRET,
};
use std::sync::Arc;

#[test]
fn test_keys_from_same_secret_interoperate() {
    // Issuer and validator build their keys separately from one secret
    let issuer_keys = JwtKeys::from_secret(b"shared-secret-between-two-processes");
    let validator_keys = JwtKeys::from_secret(b"shared-secret-between-two-processes");

    let token = issue_token(&issuer_keys, "user-42", Duration::minutes(5)).unwrap();
    let claims = validate_token(&validator_keys, &token).unwrap();
    assert_eq!(claims.sub, "user-42");
}

#[test]
fn test_fallback_secret_resolution_round_trip() {
    let secret = resolve_signing_secret(None, true).unwrap();
    assert_eq!(secret, DEV_FALLBACK_SECRET);

    let keys = JwtKeys::from_secret(secret.as_bytes());
    let token = issue_token(&keys, "demo", Duration::hours(24)).unwrap();
    assert_eq!(validate_token(&keys, &token).unwrap().sub, "demo");
}

#[test]
fn test_expiry_boundary() {
    let keys = JwtKeys::from_secret(b"boundary-secret");
    let now = Utc::now();

    let just_valid = encode_claims(
        &keys,
        &Claims::new("u", now - Duration::seconds(50), Duration::seconds(60)).unwrap(),
    )
    .unwrap();
    assert!(validate_token(&keys, &just_valid).is_ok());

    let just_expired = encode_claims(
        &keys,
        &Claims::new("u", now - Duration::seconds(61), Duration::seconds(60)).unwrap(),
    )
    .unwrap();
    assert!(matches!(
        validate_token(&keys, &just_expired),
        Err(JwtError::Expired)
    ));
}

#[test]
fn test_shared_keys_across_threads() {
    let keys = Arc::new(JwtKeys::from_secret(b"thread-shared-secret"));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let keys = Arc::clone(&keys);
            std::thread::spawn(move || {
                let subject = format!("user-{i}");
                let token = issue_token(&keys, &subject, Duration::minutes(1)).unwrap();
                validate_token(&keys, &token).unwrap().sub == subject
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
