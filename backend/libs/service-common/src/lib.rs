//! Service Common Library
//!
//! Startup flags and input rules shared by the identity and user services.

pub mod mode;
pub mod validation;

pub use mode::{env_flag, ServiceMode};
pub use validation::validate_email;
