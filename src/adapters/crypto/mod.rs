//! Cryptographic adapters.

mod aes_gcm;

pub use aes_gcm::AesGcmCredentialCipher;
