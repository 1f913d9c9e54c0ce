//! JWT implementation of the token ports.
//!
//! Tokens are HS256-signed with the configured secret and carry the
//! subject id, role, and issued/expiry times. The same service implements
//! both [`TokenIssuer`] (login handlers) and [`TokenValidator`] (HTTP
//! middleware).

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{AuthenticatedActor, Role, TokenIssuer, TokenValidator};

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: vendor or admin id.
    sub: String,
    /// Actor role.
    role: Role,
    /// Issued-at, Unix seconds.
    iat: u64,
    /// Expiry, Unix seconds.
    exp: u64,
}

/// HS256 session token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: u64,
}

impl JwtTokenService {
    /// Creates a token service from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_secret(&config.jwt_secret, config.token_ttl_secs)
    }

    /// Creates a token service from raw secret material.
    pub fn with_secret(secret: &SecretString, token_ttl_secs: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            token_ttl_secs,
        }
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, subject: &str, role: Role) -> Result<String, DomainError> {
        let now = Timestamp::now();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: now.as_unix_secs(),
            exp: now.plus_secs(self.token_ttl_secs).as_unix_secs(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign session token");
            DomainError::new(ErrorCode::InternalError, "Failed to issue session token")
        })
    }
}

impl TokenValidator for JwtTokenService {
    fn validate(&self, token: &str) -> Result<AuthenticatedActor, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| DomainError::new(ErrorCode::Unauthorized, "Invalid session token"))?;

        Ok(AuthenticatedActor {
            id: data.claims.sub,
            role: data.claims.role,
        })
    }
}
