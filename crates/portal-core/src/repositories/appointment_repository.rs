//! Appointment repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Appointment;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Appointment>, DomainError>;
    async fn list_for_client(&self, client_id: &Uuid) -> Result<Vec<Appointment>, DomainError>;
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, DomainError>;
    async fn update(&self, appointment: &Appointment) -> Result<Appointment, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn delete_for_client(&self, client_id: &Uuid) -> Result<(), DomainError>;
}
