//! Password recovery tokens
//!
//! The raw token travels in the recovery email; only its SHA-256 digest is
//! persisted.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

pub struct ResetToken {
    /// Raw token, placed in the recovery link.
    pub token: String,
    /// Hex SHA-256 digest, stored at rest.
    pub digest: String,
}

impl ResetToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);
        let digest = digest_of(&token);
        Self { token, digest }
    }
}

pub fn digest_of(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_matches_generated_token() {
        let t = ResetToken::generate();
        assert_eq!(t.digest, digest_of(&t.token));
        assert_eq!(t.digest.len(), 64);
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(ResetToken::generate().token, ResetToken::generate().token);
    }
}
