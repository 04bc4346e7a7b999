//! Profile repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Profile;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<Profile>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Profile>, DomainError>;
    /// Clients whose `assigned_to` points at the given manager.
    async fn list_clients_of(&self, manager_id: &Uuid) -> Result<Vec<Profile>, DomainError>;
    async fn create(&self, profile: &Profile) -> Result<Profile, DomainError>;
    async fn update(&self, profile: &Profile) -> Result<Profile, DomainError>;
    async fn delete(&self, user_id: &Uuid) -> Result<(), DomainError>;
    /// Null out every `assigned_to` reference to the given user.
    async fn clear_assignments(&self, manager_id: &Uuid) -> Result<(), DomainError>;
}
