/// User Service Library
///
/// Read and mutate user records behind the authentication gateway.
///
/// ## Modules
///
/// - `authz`: Ownership rule for update and delete
/// - `config`: Service configuration
/// - `error`: Error types and HTTP mapping
/// - `handlers`: HTTP handlers
/// - `routes`: Route table
/// - `services`: User operations
/// - `startup`: Composition root
/// - `validators`: Input validation
pub mod authz;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod startup;
pub mod validators;

pub use error::{AppError, Result};
pub use service_common::ServiceMode;
pub use services::UserService;
