//! KYC profile repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::KycProfile;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KycRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<KycProfile>, DomainError>;
    /// Insert-or-replace keyed on `user_id`.
    async fn upsert(&self, kyc: &KycProfile) -> Result<KycProfile, DomainError>;
    async fn delete(&self, user_id: &Uuid) -> Result<(), DomainError>;
}
