//! User provisioning service
//!
//! Creates the auth account and the profile row, then sends the welcome
//! email with a recovery link. If the profile insert fails after the account
//! was created, the account is deleted again so no orphan is left behind.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use portal_security::password::PasswordService;
use portal_security::reset_token::ResetToken;
use portal_shared::constants::RESET_TOKEN_TTL_SECONDS;

use crate::domain::{AuthAccount, PasswordResetToken, Profile, Role};
use crate::error::DomainError;
use crate::repositories::{AccountRepository, Mailer, ProfileRepository, ResetTokenRepository};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub calendly_link: Option<String>,
    pub assigned_to: Option<Uuid>,
}

pub struct ProvisioningService {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
    reset_tokens: Arc<dyn ResetTokenRepository>,
    mailer: Arc<dyn Mailer>,
    public_url: String,
}

impl ProvisioningService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        reset_tokens: Arc<dyn ResetTokenRepository>,
        mailer: Arc<dyn Mailer>,
        public_url: String,
    ) -> Self {
        Self {
            accounts,
            profiles,
            reset_tokens,
            mailer,
            public_url,
        }
    }

    pub async fn create_user(&self, input: NewUser) -> Result<Profile, DomainError> {
        info!("Provisioning user: {}", input.email);

        input
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        if self.accounts.find_by_email(&input.email).await?.is_some() {
            warn!("Provisioning failed: email already exists: {}", input.email);
            return Err(DomainError::EmailAlreadyExists(input.email));
        }

        if input.role == Role::Client {
            if let Some(manager_id) = input.assigned_to {
                let manager = self
                    .profiles
                    .find_by_user_id(&manager_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::ValidationError("assigned manager not found".to_string())
                    })?;
                if !manager.is_manager() {
                    return Err(DomainError::ValidationError(
                        "assigned_to must reference an account manager".to_string(),
                    ));
                }
            }
        }

        let password_hash = PasswordService::hash(&PasswordService::generate_initial())
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        let account = self
            .accounts
            .create(&AuthAccount::new(input.email.clone(), password_hash))
            .await?;

        let profile = Profile::new(
            account.id,
            input.first_name,
            input.last_name,
            input.email,
            input.phone,
            input.role,
            input.assigned_to,
            input.calendly_link,
        );

        let profile = match self.profiles.create(&profile).await {
            Ok(p) => p,
            Err(e) => {
                error!("Profile insert failed for {}: {}", account.email, e);
                // Compensate so the identity store holds no orphan
                if let Err(cleanup) = self.accounts.delete(&account.id).await {
                    error!(
                        "Failed to remove orphaned account {}: {}",
                        account.id, cleanup
                    );
                }
                return Err(e);
            }
        };

        if let Err(e) = self.send_welcome(&profile).await {
            warn!("Welcome email failed for {}: {}", profile.email, e);
            // Provisioning itself succeeded
        }

        info!("User provisioned: {}", profile.user_id);
        Ok(profile)
    }

    async fn send_welcome(&self, profile: &Profile) -> Result<(), DomainError> {
        let token = ResetToken::generate();
        let record = PasswordResetToken::new(
            token.digest.clone(),
            profile.user_id,
            RESET_TOKEN_TTL_SECONDS,
        );
        self.reset_tokens.insert(&record).await?;

        let recovery_url = format!(
            "{}/api/auth/callback?token={}",
            self.public_url, token.token
        );
        self.mailer
            .send_welcome(&profile.email, &profile.first_name, &recovery_url)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::account_repository::MockAccountRepository;
    use crate::repositories::mailer::MockMailer;
    use crate::repositories::profile_repository::MockProfileRepository;
    use crate::repositories::reset_token_repository::MockResetTokenRepository;

    fn new_client(email: &str, assigned_to: Option<Uuid>) -> NewUser {
        NewUser {
            email: email.to_string(),
            first_name: "Karim".to_string(),
            last_name: "Bel".to_string(),
            phone: None,
            role: Role::Client,
            calendly_link: None,
            assigned_to,
        }
    }

    #[tokio::test]
    async fn test_create_user_success_creates_account_and_profile() {
        let manager_id = Uuid::new_v4();

        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));
        accounts
            .expect_create()
            .times(1)
            .returning(|account| Ok(account.clone()));

        let mut profiles = MockProfileRepository::new();
        let manager = Profile::new(
            manager_id,
            "Anne".to_string(),
            "Morel".to_string(),
            "anne@exemple.fr".to_string(),
            None,
            Role::ChargeDeCompte,
            None,
            None,
        );
        profiles
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(manager.clone())));
        profiles
            .expect_create()
            .times(1)
            .returning(|profile| Ok(profile.clone()));

        let mut reset_tokens = MockResetTokenRepository::new();
        reset_tokens.expect_insert().returning(|_| Ok(()));
        let mut mailer = MockMailer::new();
        mailer
            .expect_send_welcome()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let svc = ProvisioningService::new(
            Arc::new(accounts),
            Arc::new(profiles),
            Arc::new(reset_tokens),
            Arc::new(mailer),
            "http://localhost:8080".to_string(),
        );

        let profile = svc
            .create_user(new_client("karim@exemple.fr", Some(manager_id)))
            .await
            .unwrap();
        assert_eq!(profile.assigned_to, Some(manager_id));
    }

    #[tokio::test]
    async fn test_profile_insert_failure_removes_orphaned_account() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));
        accounts
            .expect_create()
            .returning(|account| Ok(account.clone()));
        accounts.expect_delete().times(1).returning(|_| Ok(()));

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_create()
            .returning(|_| Err(DomainError::DatabaseError("insert failed".to_string())));

        let svc = ProvisioningService::new(
            Arc::new(accounts),
            Arc::new(profiles),
            Arc::new(MockResetTokenRepository::new()),
            Arc::new(MockMailer::new()),
            "http://localhost:8080".to_string(),
        );

        let err = svc
            .create_user(new_client("karim@exemple.fr", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        use fake::{faker::internet::en::SafeEmail, Fake};

        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_email().returning(|email| {
            Ok(Some(AuthAccount::new(email.to_string(), "hash".to_string())))
        });
        accounts.expect_create().times(0);

        let svc = ProvisioningService::new(
            Arc::new(accounts),
            Arc::new(MockProfileRepository::new()),
            Arc::new(MockResetTokenRepository::new()),
            Arc::new(MockMailer::new()),
            "http://localhost:8080".to_string(),
        );

        let email: String = SafeEmail().fake();
        let err = svc
            .create_user(new_client(&email, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_welcome_email_failure_does_not_fail_provisioning() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));
        accounts
            .expect_create()
            .returning(|account| Ok(account.clone()));

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_create()
            .returning(|profile| Ok(profile.clone()));

        let mut reset_tokens = MockResetTokenRepository::new();
        reset_tokens.expect_insert().returning(|_| Ok(()));
        let mut mailer = MockMailer::new();
        mailer
            .expect_send_welcome()
            .returning(|_, _, _| Err(DomainError::EmailError("smtp down".to_string())));

        let svc = ProvisioningService::new(
            Arc::new(accounts),
            Arc::new(profiles),
            Arc::new(reset_tokens),
            Arc::new(mailer),
            "http://localhost:8080".to_string(),
        );

        assert!(svc
            .create_user(new_client("karim@exemple.fr", None))
            .await
            .is_ok());
    }
}
