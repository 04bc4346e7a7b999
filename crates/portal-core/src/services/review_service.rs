//! Document review service
//!
//! Client submits the KYC form, a reviewer approves or rejects it with a
//! comment, the client is notified by email. Review emails are best-effort:
//! the status change stands even if the notification fails.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{KycProfile, Profile};
use crate::error::DomainError;
use crate::repositories::{KycRepository, Mailer, ProfileRepository};

/// Fields of the KYC form. File paths are set by the upload endpoint and
/// only overwrite the stored ones when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KycSubmission {
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub passport_path: Option<String>,
    pub id_card_path: Option<String>,
}

pub struct ReviewService {
    kyc: Arc<dyn KycRepository>,
    profiles: Arc<dyn ProfileRepository>,
    mailer: Arc<dyn Mailer>,
}

impl ReviewService {
    pub fn new(
        kyc: Arc<dyn KycRepository>,
        profiles: Arc<dyn ProfileRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            kyc,
            profiles,
            mailer,
        }
    }

    /// Client saved the form: upsert the row back to `pending`, clearing any
    /// earlier rejection comment.
    pub async fn submit(
        &self,
        user_id: &Uuid,
        submission: KycSubmission,
    ) -> Result<KycProfile, DomainError> {
        self.require_profile(user_id).await?;

        let mut kyc = self
            .kyc
            .find_by_user_id(user_id)
            .await?
            .unwrap_or_else(|| KycProfile::new(*user_id));

        kyc.birth_date = submission.birth_date.or(kyc.birth_date);
        kyc.birth_place = submission.birth_place.or(kyc.birth_place);
        kyc.nationality = submission.nationality.or(kyc.nationality);
        kyc.address = submission.address.or(kyc.address);
        kyc.city = submission.city.or(kyc.city);
        kyc.postal_code = submission.postal_code.or(kyc.postal_code);
        kyc.passport_path = submission.passport_path.or(kyc.passport_path);
        kyc.id_card_path = submission.id_card_path.or(kyc.id_card_path);

        kyc.submit();
        let saved = self.kyc.upsert(&kyc).await?;

        info!("Kyc submission saved for: {}", user_id);
        Ok(saved)
    }

    pub async fn approve(&self, user_id: &Uuid) -> Result<KycProfile, DomainError> {
        let mut kyc = self
            .kyc
            .find_by_user_id(user_id)
            .await?
            .ok_or(DomainError::KycProfileNotFound)?;

        kyc.approve();
        let saved = self.kyc.upsert(&kyc).await?;

        let profile = self.require_profile(user_id).await?;
        if let Err(e) = self
            .mailer
            .send_documents_validated(&profile.email, &profile.first_name)
            .await
        {
            warn!("Validation email failed for {}: {}", profile.email, e);
        }

        info!("Kyc approved for: {}", user_id);
        Ok(saved)
    }

    pub async fn reject(&self, user_id: &Uuid, comment: &str) -> Result<KycProfile, DomainError> {
        let mut kyc = self
            .kyc
            .find_by_user_id(user_id)
            .await?
            .ok_or(DomainError::KycProfileNotFound)?;

        kyc.reject(comment)?;
        let saved = self.kyc.upsert(&kyc).await?;

        let profile = self.require_profile(user_id).await?;
        if let Err(e) = self
            .mailer
            .send_documents_rejected(&profile.email, &profile.first_name, comment)
            .await
        {
            warn!("Rejection email failed for {}: {}", profile.email, e);
        }

        info!("Kyc rejected for: {}", user_id);
        Ok(saved)
    }

    /// Back-office notice fired by the document-submission endpoint.
    pub async fn notify_submission(
        &self,
        document_kind: &str,
        client_email: &str,
    ) -> Result<(), DomainError> {
        self.mailer
            .send_document_submitted(document_kind, client_email)
            .await
    }

    async fn require_profile(&self, user_id: &Uuid) -> Result<Profile, DomainError> {
        self.profiles
            .find_by_user_id(user_id)
            .await?
            .ok_or(DomainError::ProfileNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReviewStatus, Role};
    use crate::repositories::kyc_repository::MockKycRepository;
    use crate::repositories::mailer::MockMailer;
    use crate::repositories::profile_repository::MockProfileRepository;

    fn client_profile(user_id: Uuid) -> Profile {
        Profile::new(
            user_id,
            "Karim".to_string(),
            "Bel".to_string(),
            "karim@exemple.fr".to_string(),
            None,
            Role::Client,
            None,
            None,
        )
    }

    fn profiles_returning(user_id: Uuid) -> MockProfileRepository {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(client_profile(user_id))));
        profiles
    }

    #[tokio::test]
    async fn test_resubmission_after_rejection_goes_back_to_pending() {
        let user_id = Uuid::new_v4();

        let mut rejected = KycProfile::new(user_id);
        rejected.submit();
        rejected.reject("photo illisible").unwrap();

        let mut kyc = MockKycRepository::new();
        kyc.expect_find_by_user_id()
            .returning(move |_| Ok(Some(rejected.clone())));
        kyc.expect_upsert().returning(|k| Ok(k.clone()));

        let svc = ReviewService::new(
            Arc::new(kyc),
            Arc::new(profiles_returning(user_id)),
            Arc::new(MockMailer::new()),
        );

        let saved = svc.submit(&user_id, KycSubmission::default()).await.unwrap();
        assert_eq!(saved.status, ReviewStatus::Pending);
        assert!(saved.comment.is_none());
    }

    #[tokio::test]
    async fn test_approve_notifies_client() {
        let user_id = Uuid::new_v4();

        let mut pending = KycProfile::new(user_id);
        pending.submit();

        let mut kyc = MockKycRepository::new();
        kyc.expect_find_by_user_id()
            .returning(move |_| Ok(Some(pending.clone())));
        kyc.expect_upsert().returning(|k| Ok(k.clone()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send_documents_validated()
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = ReviewService::new(
            Arc::new(kyc),
            Arc::new(profiles_returning(user_id)),
            Arc::new(mailer),
        );

        let saved = svc.approve(&user_id).await.unwrap();
        assert_eq!(saved.status, ReviewStatus::Approved);
        assert!(saved.comment.is_none());
    }

    #[tokio::test]
    async fn test_reject_carries_comment_and_survives_email_failure() {
        let user_id = Uuid::new_v4();

        let mut pending = KycProfile::new(user_id);
        pending.submit();

        let mut kyc = MockKycRepository::new();
        kyc.expect_find_by_user_id()
            .returning(move |_| Ok(Some(pending.clone())));
        kyc.expect_upsert().returning(|k| Ok(k.clone()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send_documents_rejected()
            .returning(|_, _, _| Err(DomainError::EmailError("smtp down".to_string())));

        let svc = ReviewService::new(
            Arc::new(kyc),
            Arc::new(profiles_returning(user_id)),
            Arc::new(mailer),
        );

        let saved = svc.reject(&user_id, "photo illisible").await.unwrap();
        assert_eq!(saved.status, ReviewStatus::Rejected);
        assert_eq!(saved.comment.as_deref(), Some("photo illisible"));
    }

    #[tokio::test]
    async fn test_reject_without_comment_is_a_validation_error() {
        let user_id = Uuid::new_v4();
        let mut pending = KycProfile::new(user_id);
        pending.submit();

        let mut kyc = MockKycRepository::new();
        kyc.expect_find_by_user_id()
            .returning(move |_| Ok(Some(pending.clone())));
        kyc.expect_upsert().times(0);

        let svc = ReviewService::new(
            Arc::new(kyc),
            Arc::new(MockProfileRepository::new()),
            Arc::new(MockMailer::new()),
        );

        let err = svc.reject(&user_id, "").await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }
}
