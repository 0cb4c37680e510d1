//! # Actix Middleware Library
//!
//! Middleware shared by the identity and user services
//!
//! ## Modules
//! - `jwt_auth`: bearer-token authentication gateway and principal extractor
//! - `logging`: per-request structured logging

pub mod jwt_auth;
pub mod logging;

pub use jwt_auth::{AuthGateway, AuthPrincipal, GatewayError};
pub use logging::RequestLogging;
