//! Ownership rule for mutating operations
//!
//! Reads need only an authenticated principal. Update and delete are allowed
//! when the caller is the record's own principal, or when the gateway runs in
//! bypass mode.

use crate::error::{AppError, Result};
use actix_middleware::AuthPrincipal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Delete,
}

impl Mutation {
    fn denial(self) -> &'static str {
        match self {
            Mutation::Update => "cannot update other users",
            Mutation::Delete => "cannot delete other users",
        }
    }
}

pub fn authorize_mutation(principal: &AuthPrincipal, target_id: &str, action: Mutation) -> Result<()> {
    match principal {
        AuthPrincipal::Bypass => Ok(()),
        AuthPrincipal::User(id) if id == target_id => Ok(()),
        AuthPrincipal::User(id) => {
            tracing::warn!(principal = %id, target = %target_id, ?action, "mutation denied");
            Err(AppError::PermissionDenied(action.denial()))
        }
    }
}
