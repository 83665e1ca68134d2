//! JWT session token issuance and validation
//!
//! A session token is the only token kind issued: signed with a shared
//! secret, carrying the account id and username, expiring 60 minutes
//! after issuance. There is no refresh mechanism.
//!
//! Keys are pre-computed once at startup and shared via Arc.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account ID)
    pub sub: String,
    /// Username at issuance
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for session token operations
///
/// Uses pre-computed keys to avoid key derivation on every request.
/// Create once at startup and store in AppState; cloning is cheap.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    session_expiry_secs: i64,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    pub fn new(secret: &str, session_expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            session_expiry_secs,
        }
    }

    /// Issue a signed session token for an account
    pub fn issue_session_token(&self, account_id: Uuid, username: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.session_expiry_secs);

        let claims = SessionClaims {
            sub: account_id.to_string(),
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to sign session token: {}", e))
    }

    /// Validate a session token and return its claims
    ///
    /// Rejects tampered signatures and expired tokens.
    #[inline]
    pub fn validate_session_token(&self, token: &str) -> Result<SessionClaims> {
        let token_data =
            decode::<SessionClaims>(token, self.keys.decoding(), &Validation::default())
                .map_err(|e| anyhow::anyhow!("Invalid session token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Get session token expiry in seconds
    #[inline]
    pub fn session_expiry_secs(&self) -> i64 {
        self.session_expiry_secs
    }
}
