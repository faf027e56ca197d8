//! SHA-256 password digests.

use sha2::{Digest, Sha256};

/// Produces the lower-case hex SHA-256 digest stored in `users.password_hash`.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password.
    pub fn hash_password(&self, password: &str) -> String {
        format!("{:x}", Sha256::digest(password.as_bytes()))
    }
}
