//! Input validation for registration and login

use crate::error::{IdentityError, Result};
use service_common::validate_email;

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn validate_registration(email: &str, password: &str, name: &str) -> Result<()> {
    if email.is_empty() || password.is_empty() || name.trim().is_empty() {
        return Err(IdentityError::InvalidArgument(
            "email, password, and name are required".to_string(),
        ));
    }
    if !validate_email(email) {
        return Err(IdentityError::InvalidArgument("invalid email format".to_string()));
    }
    if !validate_password(password) {
        return Err(IdentityError::InvalidArgument(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<()> {
    if email.is_empty() || password.is_empty() {
        return Err(IdentityError::InvalidArgument(
            "email and password are required".to_string(),
        ));
    }
    Ok(())
}
