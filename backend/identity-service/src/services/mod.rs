pub mod issuer;

pub use issuer::{IssuedToken, TokenIssuer};
