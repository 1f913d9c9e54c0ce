//! Authentication adapters.

mod jwt;
mod mock;
mod password;

pub use jwt::JwtTokenService;
pub use mock::MockTokenValidator;
pub use password::Argon2PasswordHasher;
