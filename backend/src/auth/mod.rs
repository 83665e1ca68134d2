//! Authentication primitives
//!
//! JWT session tokens, argon2 password hashing and opaque one-time
//! token generation.

mod jwt;
mod middleware;
mod password;
mod token;

pub use jwt::{JwtService, SessionClaims};
pub use middleware::AuthUser;
pub use password::{PasswordService, FALLBACK_HASH};
pub use token::TokenService;
