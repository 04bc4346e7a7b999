//! Upcoming action repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::UpcomingAction;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActionRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UpcomingAction>, DomainError>;
    async fn list_for_client(&self, client_id: &Uuid) -> Result<Vec<UpcomingAction>, DomainError>;
    async fn create(&self, action: &UpcomingAction) -> Result<UpcomingAction, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn delete_for_client(&self, client_id: &Uuid) -> Result<(), DomainError>;
}
