//! Credential cipher port.

use crate::domain::foundation::DomainError;

/// Authenticated encryption for stored account credentials.
///
/// Implementations must fail closed: decryption of malformed or tampered
/// input returns an error, never garbage plaintext.
pub trait CredentialCipher: Send + Sync {
    /// Encrypts a plaintext credential into the stored representation.
    fn encrypt(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Decrypts a stored representation back into the plaintext credential.
    ///
    /// # Errors
    ///
    /// - `CryptoError` on malformed input, wrong key, or tag mismatch
    fn decrypt(&self, stored: &str) -> Result<String, DomainError>;
}
