//! Profile update validation

use crate::error::{AppError, Result};
use service_common::validate_email;

pub fn validate_profile_update(name: &str, email: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidArgument("name is required".to_string()));
    }
    if !validate_email(email) {
        return Err(AppError::InvalidArgument("invalid email format".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_rules() {
        assert!(validate_profile_update("Alice", "alice@example.com").is_ok());
        assert!(validate_profile_update("  ", "alice@example.com").is_err());
        assert!(validate_profile_update("Alice", "").is_err());
        assert!(validate_profile_update("Alice", "alice@").is_err());
    }
}
