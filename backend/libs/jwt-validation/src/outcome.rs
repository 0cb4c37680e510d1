use serde::{Deserialize, Serialize};

/// Verdict on a token. `user_id` is empty whenever `valid` is false.
///
/// Also the wire body of the identity service's validate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub user_id: String,
}

impl ValidationOutcome {
    pub fn valid(user_id: impl Into<String>) -> Self {
        Self {
            valid: true,
            user_id: user_id.into(),
        }
    }

    pub fn invalid() -> Self {
        Self {
            valid: false,
            user_id: String::new(),
        }
    }

    /// The principal id, only when the token was accepted and names one.
    pub fn principal(&self) -> Option<&str> {
        (self.valid && !self.user_id.is_empty()).then_some(self.user_id.as_str())
    }
}
