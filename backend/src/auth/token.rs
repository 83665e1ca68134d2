//! Opaque one-time token generation
//!
//! Reset and confirmation tokens are random strings with no decodable
//! structure, used only for equality lookup in the store.

use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes per token; 32 bytes = 256 bits of entropy.
const TOKEN_BYTES: usize = 32;

/// Opaque token generator backed by the OS CSPRNG
///
/// Collisions are never checked at generation time; their probability is
/// negligible, and the store's unique indexes turn one into a hard error.
pub struct TokenService;

impl TokenService {
    /// Generate a fresh opaque token, hex-encoded for URL embedding
    pub fn generate() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}
