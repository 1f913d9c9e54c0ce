//! Credential encryption configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Credential encryption configuration (AES-256-GCM)
#[derive(Debug, Clone, Deserialize)]
pub struct EncryptionConfig {
    /// Key material; must be at least 32 characters. The first 32 bytes
    /// are used as the AES-256 key.
    pub key: SecretString,
}

impl EncryptionConfig {
    /// Validate encryption configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("ENCRYPTION__KEY"));
        }
        if self.key.expose_secret().len() < 32 {
            return Err(ValidationError::EncryptionKeyTooShort);
        }
        Ok(())
    }
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            key: SecretString::new(String::new()),
        }
    }
}
