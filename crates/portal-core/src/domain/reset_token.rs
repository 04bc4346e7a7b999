//! Password recovery token (persisted form)

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetToken {
    /// SHA-256 digest of the raw token; the raw token never reaches the
    /// database.
    pub token_digest: String,
    pub account_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    pub fn new(token_digest: String, account_id: Uuid, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            token_digest,
            account_id,
            expires_at: now + Duration::seconds(ttl_seconds),
            used_at: None,
            created_at: now,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.used_at.is_none() && self.expires_at > Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_usable() {
        let t = PasswordResetToken::new("digest".to_string(), Uuid::new_v4(), 3600);
        assert!(t.is_usable());
    }

    #[test]
    fn test_used_or_expired_token_is_not_usable() {
        let mut t = PasswordResetToken::new("digest".to_string(), Uuid::new_v4(), 3600);
        t.used_at = Some(Utc::now());
        assert!(!t.is_usable());

        let expired = PasswordResetToken::new("digest".to_string(), Uuid::new_v4(), -1);
        assert!(!expired.is_usable());
    }
}
