//! Auth account repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::AuthAccount;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AuthAccount>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthAccount>, DomainError>;
    async fn create(&self, account: &AuthAccount) -> Result<AuthAccount, DomainError>;
    async fn update_password(&self, id: &Uuid, password_hash: &str) -> Result<(), DomainError>;
    async fn record_sign_in(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
