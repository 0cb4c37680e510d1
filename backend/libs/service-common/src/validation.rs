//! Input rules common to both services

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_EMAIL_LEN: usize = 254;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // Hardcoded pattern, checked by the tests below
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= MAX_EMAIL_LEN && EMAIL_REGEX.is_match(email)
}
