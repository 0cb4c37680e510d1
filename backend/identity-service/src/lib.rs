/// Identity Service Library
///
/// Issues and verifies bearer tokens for the platform.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `error`: Error types and HTTP mapping
/// - `handlers`: HTTP handlers (register, login, validate, health)
/// - `routes`: Route table
/// - `security`: Password hashing
/// - `seed`: Demo accounts for the live store
/// - `services`: Token issuer
/// - `startup`: Store selection and server construction
/// - `validators`: Input validation
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod security;
pub mod seed;
pub mod services;
pub mod startup;
pub mod validators;

// Re-export commonly used types
pub use error::{IdentityError, Result};
pub use services::TokenIssuer;
