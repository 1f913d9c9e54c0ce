//! Mock token validator for testing.

use std::collections::HashMap;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AuthenticatedActor, TokenValidator};

/// In-memory token validator mapping fixed tokens to actors.
#[derive(Default)]
pub struct MockTokenValidator {
    actors: HashMap<String, AuthenticatedActor>,
}

impl MockTokenValidator {
    /// Creates an empty validator that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token that validates to the given actor.
    pub fn with_actor(mut self, token: impl Into<String>, actor: AuthenticatedActor) -> Self {
        self.actors.insert(token.into(), actor);
        self
    }
}

impl TokenValidator for MockTokenValidator {
    fn validate(&self, token: &str) -> Result<AuthenticatedActor, DomainError> {
        self.actors
            .get(token)
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::Unauthorized, "Invalid session token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Role;

    #[test]
    fn known_token_resolves_registered_actor() {
        let validator = MockTokenValidator::new().with_actor(
            "token-1",
            AuthenticatedActor {
                id: "vendor-1".into(),
                role: Role::Vendor,
            },
        );
        assert_eq!(validator.validate("token-1").unwrap().id, "vendor-1");
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = MockTokenValidator::new().validate("nope").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
