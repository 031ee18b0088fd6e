//! `yams-auth`: session tokens and password hashing.
//!
//! Decoupled from HTTP and storage: the API layer decides where tokens travel
//! and where hashes are kept.

pub mod claims;
pub mod password;
pub mod token;

pub use claims::{Claims, TokenValidationError, validate_claims};
pub use password::PasswordError;
pub use token::{Hs256Tokens, JwtValidator, TokenError, TokenIssuer};
