//! # strata-auth
//!
//! Authentication primitives for Strata.
//!
//! ## Modules
//!
//! - `jwt`: HS256 token creation and verification
//! - `password`: SHA-256 password digests matched against stored hashes

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
