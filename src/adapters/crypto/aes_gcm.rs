//! AES-256-GCM implementation of the CredentialCipher port.
//!
//! Stored format is `nonceHex:cipherHex`: a fresh 12-byte nonce generated
//! via OsRng for every encryption, then the ciphertext with the GCM tag
//! appended. Decryption fails closed on malformed input, a wrong key, or a
//! tag mismatch.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CredentialCipher;

/// GCM standard nonce length in bytes.
const NONCE_LEN: usize = 12;

/// AES-256-GCM credential cipher keyed from configuration.
pub struct AesGcmCredentialCipher {
    cipher: Aes256Gcm,
}

impl AesGcmCredentialCipher {
    /// Creates a cipher from configured key material.
    ///
    /// The first 32 bytes of the key string are used as the raw AES-256
    /// key; configuration validation guarantees at least 32 characters.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError` if the key material is shorter than 32 bytes.
    pub fn from_key_material(key: &SecretString) -> Result<Self, DomainError> {
        let bytes = key.expose_secret().as_bytes();
        if bytes.len() < 32 {
            return Err(DomainError::new(
                ErrorCode::CryptoError,
                "Encryption key material must be at least 32 bytes",
            ));
        }
        let key = Key::<Aes256Gcm>::from_slice(&bytes[..32]);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    fn crypto_error(context: &str) -> DomainError {
        // Never include key or plaintext material in the error.
        DomainError::new(ErrorCode::CryptoError, format!("Credential {} failed", context))
    }
}

impl CredentialCipher for AesGcmCredentialCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String, DomainError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| {
                tracing::error!(error = %e, "credential encryption failed");
                Self::crypto_error("encryption")
            })?;

        Ok(format!("{}:{}", hex::encode(nonce_bytes), hex::encode(ciphertext)))
    }

    fn decrypt(&self, stored: &str) -> Result<String, DomainError> {
        let (nonce_hex, cipher_hex) = stored
            .split_once(':')
            .ok_or_else(|| Self::crypto_error("decryption"))?;

        let nonce_bytes =
            hex::decode(nonce_hex).map_err(|_| Self::crypto_error("decryption"))?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(Self::crypto_error("decryption"));
        }
        let ciphertext =
            hex::decode(cipher_hex).map_err(|_| Self::crypto_error("decryption"))?;

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
            .map_err(|e| {
                tracing::error!(error = %e, "credential decryption failed");
                Self::crypto_error("decryption")
            })?;

        String::from_utf8(plaintext).map_err(|_| Self::crypto_error("decryption"))
    }
}
