//! Password reset token repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::PasswordResetToken;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResetTokenRepository: Send + Sync {
    async fn insert(&self, token: &PasswordResetToken) -> Result<(), DomainError>;
    async fn find_by_digest(
        &self,
        token_digest: &str,
    ) -> Result<Option<PasswordResetToken>, DomainError>;
    async fn mark_used(&self, token_digest: &str) -> Result<(), DomainError>;
    async fn delete_for_account(&self, account_id: &Uuid) -> Result<(), DomainError>;
}
