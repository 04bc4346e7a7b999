//! User deletion service
//!
//! Cascading cleanup in a fixed order: assignment references, appointments,
//! progress rows, upcoming actions, both storage folders, KYC profile,
//! profile, and finally the auth account. There is no wrapping transaction;
//! a failed step is logged and the cascade continues, so the caller only
//! sees the outcome of the final step.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use portal_shared::constants::{CLIENT_DOCUMENTS_PREFIX, IDENTITY_DOCUMENTS_PREFIX};

use crate::error::DomainError;
use crate::repositories::{
    AccountRepository, ActionRepository, AppointmentRepository, DocumentStore, KycRepository,
    ProfileRepository, ProgressRepository,
};

pub struct DeletionService {
    profiles: Arc<dyn ProfileRepository>,
    kyc: Arc<dyn KycRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    progress: Arc<dyn ProgressRepository>,
    actions: Arc<dyn ActionRepository>,
    accounts: Arc<dyn AccountRepository>,
    documents: Arc<dyn DocumentStore>,
}

impl DeletionService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        kyc: Arc<dyn KycRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        progress: Arc<dyn ProgressRepository>,
        actions: Arc<dyn ActionRepository>,
        accounts: Arc<dyn AccountRepository>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            profiles,
            kyc,
            appointments,
            progress,
            actions,
            accounts,
            documents,
        }
    }

    pub async fn delete_user(&self, user_id: &Uuid) -> Result<(), DomainError> {
        info!("Deleting user: {}", user_id);

        if let Err(e) = self.profiles.clear_assignments(user_id).await {
            error!("Failed to clear assignments of {}: {}", user_id, e);
        }
        if let Err(e) = self.appointments.delete_for_client(user_id).await {
            error!("Failed to delete appointments of {}: {}", user_id, e);
        }
        if let Err(e) = self.progress.delete_for_client(user_id).await {
            error!("Failed to delete progress of {}: {}", user_id, e);
        }
        if let Err(e) = self.actions.delete_for_client(user_id).await {
            error!("Failed to delete actions of {}: {}", user_id, e);
        }

        let identity_folder = format!("{}/{}", IDENTITY_DOCUMENTS_PREFIX, user_id);
        if let Err(e) = self.documents.delete_prefix(&identity_folder).await {
            error!("Failed to delete folder {}: {}", identity_folder, e);
        }
        let client_folder = format!("{}/{}", CLIENT_DOCUMENTS_PREFIX, user_id);
        if let Err(e) = self.documents.delete_prefix(&client_folder).await {
            error!("Failed to delete folder {}: {}", client_folder, e);
        }

        if let Err(e) = self.kyc.delete(user_id).await {
            error!("Failed to delete kyc profile of {}: {}", user_id, e);
        }
        if let Err(e) = self.profiles.delete(user_id).await {
            error!("Failed to delete profile of {}: {}", user_id, e);
        }

        self.accounts.delete(user_id).await?;

        info!("User deleted: {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::account_repository::MockAccountRepository;
    use crate::repositories::action_repository::MockActionRepository;
    use crate::repositories::appointment_repository::MockAppointmentRepository;
    use crate::repositories::document_store::MockDocumentStore;
    use crate::repositories::kyc_repository::MockKycRepository;
    use crate::repositories::profile_repository::MockProfileRepository;
    use crate::repositories::progress_repository::MockProgressRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_delete_user_touches_every_table_and_both_folders() {
        let user_id = Uuid::new_v4();

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_clear_assignments()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(()));
        profiles
            .expect_delete()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(()));

        let mut appointments = MockAppointmentRepository::new();
        appointments
            .expect_delete_for_client()
            .times(1)
            .returning(|_| Ok(()));
        let mut progress = MockProgressRepository::new();
        progress
            .expect_delete_for_client()
            .times(1)
            .returning(|_| Ok(()));
        let mut actions = MockActionRepository::new();
        actions
            .expect_delete_for_client()
            .times(1)
            .returning(|_| Ok(()));

        let mut documents = MockDocumentStore::new();
        let identity_folder = format!("documents/{}", user_id);
        documents
            .expect_delete_prefix()
            .withf(move |prefix| prefix == identity_folder)
            .times(1)
            .returning(|_| Ok(()));
        let client_folder = format!("documents/clients/{}", user_id);
        documents
            .expect_delete_prefix()
            .withf(move |prefix| prefix == client_folder)
            .times(1)
            .returning(|_| Ok(()));

        let mut kyc = MockKycRepository::new();
        kyc.expect_delete().times(1).returning(|_| Ok(()));
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_delete()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(()));

        let svc = DeletionService::new(
            Arc::new(profiles),
            Arc::new(kyc),
            Arc::new(appointments),
            Arc::new(progress),
            Arc::new(actions),
            Arc::new(accounts),
            Arc::new(documents),
        );
        assert!(svc.delete_user(&user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_cascade_continues_past_a_failed_step() {
        let user_id = Uuid::new_v4();

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_clear_assignments()
            .returning(|_| Ok(()));
        profiles.expect_delete().times(1).returning(|_| Ok(()));

        let mut appointments = MockAppointmentRepository::new();
        appointments
            .expect_delete_for_client()
            .returning(|_| Err(DomainError::DatabaseError("timeout".to_string())));

        let mut progress = MockProgressRepository::new();
        progress
            .expect_delete_for_client()
            .times(1)
            .returning(|_| Ok(()));
        let mut actions = MockActionRepository::new();
        actions
            .expect_delete_for_client()
            .times(1)
            .returning(|_| Ok(()));
        let mut documents = MockDocumentStore::new();
        documents
            .expect_delete_prefix()
            .times(2)
            .returning(|_| Ok(()));
        let mut kyc = MockKycRepository::new();
        kyc.expect_delete().times(1).returning(|_| Ok(()));
        let mut accounts = MockAccountRepository::new();
        accounts.expect_delete().times(1).returning(|_| Ok(()));

        let svc = DeletionService::new(
            Arc::new(profiles),
            Arc::new(kyc),
            Arc::new(appointments),
            Arc::new(progress),
            Arc::new(actions),
            Arc::new(accounts),
            Arc::new(documents),
        );
        // The appointment step failed, but the caller sees the final step
        assert!(svc.delete_user(&user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_final_step_failure_is_surfaced() {
        let user_id = Uuid::new_v4();

        let mut profiles = MockProfileRepository::new();
        profiles.expect_clear_assignments().returning(|_| Ok(()));
        profiles.expect_delete().returning(|_| Ok(()));
        let mut appointments = MockAppointmentRepository::new();
        appointments
            .expect_delete_for_client()
            .returning(|_| Ok(()));
        let mut progress = MockProgressRepository::new();
        progress.expect_delete_for_client().returning(|_| Ok(()));
        let mut actions = MockActionRepository::new();
        actions.expect_delete_for_client().returning(|_| Ok(()));
        let mut documents = MockDocumentStore::new();
        documents.expect_delete_prefix().returning(|_| Ok(()));
        let mut kyc = MockKycRepository::new();
        kyc.expect_delete().returning(|_| Ok(()));
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_delete()
            .returning(|_| Err(DomainError::DatabaseError("gone".to_string())));

        let svc = DeletionService::new(
            Arc::new(profiles),
            Arc::new(kyc),
            Arc::new(appointments),
            Arc::new(progress),
            Arc::new(actions),
            Arc::new(accounts),
            Arc::new(documents),
        );
        assert!(svc.delete_user(&user_id).await.is_err());
    }
}
