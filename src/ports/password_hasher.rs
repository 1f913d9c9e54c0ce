//! Password hasher port.

use crate::domain::foundation::DomainError;

/// Hashing and verification of account passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a PHC string.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for malformed
    /// hashes.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
