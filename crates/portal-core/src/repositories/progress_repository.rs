//! Business progress repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::BusinessProgress;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn list_for_client(&self, client_id: &Uuid)
        -> Result<Vec<BusinessProgress>, DomainError>;
    /// Upsert keyed on (client_id, step); the pair is never duplicated.
    async fn upsert(&self, progress: &BusinessProgress) -> Result<BusinessProgress, DomainError>;
    async fn delete_for_client(&self, client_id: &Uuid) -> Result<(), DomainError>;
}
