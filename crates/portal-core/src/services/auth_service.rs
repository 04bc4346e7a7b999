//! Authentication service: login, password recovery, password reset

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use portal_security::jwt::JwtService;
use portal_security::password::PasswordService;
use portal_security::reset_token::{self, ResetToken};
use portal_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, RESET_TOKEN_TTL_SECONDS};

use crate::domain::{PasswordResetToken, Profile};
use crate::error::DomainError;
use crate::repositories::{AccountRepository, Mailer, ProfileRepository, ResetTokenRepository};

pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
    reset_tokens: Arc<dyn ResetTokenRepository>,
    mailer: Arc<dyn Mailer>,
    jwt: Arc<JwtService>,
    public_url: String,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        reset_tokens: Arc<dyn ResetTokenRepository>,
        mailer: Arc<dyn Mailer>,
        jwt: Arc<JwtService>,
        public_url: String,
    ) -> Self {
        Self {
            accounts,
            profiles,
            reset_tokens,
            mailer,
            jwt,
            public_url,
        }
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for email: {}", email);

        let account = self.accounts.find_by_email(email).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", email);
            DomainError::InvalidCredentials
        })?;

        let password_valid = PasswordService::verify(password, &account.password_hash)
            .map_err(|_e| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", email);
            return Err(DomainError::InvalidCredentials);
        }

        let profile = self
            .profiles
            .find_by_user_id(&account.id)
            .await?
            .ok_or(DomainError::ProfileNotFound)?;

        if !profile.is_active {
            warn!("Login failed: profile deactivated: {}", email);
            return Err(DomainError::AccountNotActive);
        }

        let access_token = self
            .jwt
            .generate_access_token(&account.id, profile.role.as_str())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        if let Err(e) = self.accounts.record_sign_in(&account.id).await {
            warn!("Failed to record sign-in for {}: {}", email, e);
            // Don't fail login for this
        }

        info!("Login successful for: {}", email);

        Ok(LoginResult {
            user: UserInfo::from(&profile),
            access_token,
        })
    }

    /// Start password recovery. Reports success whether or not the email is
    /// known, so the endpoint cannot be used to enumerate accounts.
    pub async fn recover(&self, email: &str) -> Result<(), DomainError> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            warn!("Password recovery requested for unknown email: {}", email);
            return Ok(());
        };

        let token = ResetToken::generate();
        let record =
            PasswordResetToken::new(token.digest.clone(), account.id, RESET_TOKEN_TTL_SECONDS);
        self.reset_tokens.insert(&record).await?;

        let recovery_url = self.recovery_url(&token.token);
        self.mailer
            .send_password_recovery(&account.email, &recovery_url)
            .await?;

        info!("Password recovery email sent to: {}", email);
        Ok(())
    }

    /// Complete password recovery with the emailed token.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let record = self.find_usable_token(token).await?;

        if new_password.len() < MIN_PASSWORD_LENGTH || new_password.len() > MAX_PASSWORD_LENGTH {
            return Err(DomainError::ValidationError(format!(
                "password must be between {} and {} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }
        PasswordService::check_strength(new_password)
            .map_err(|_e| DomainError::PasswordTooWeak)?;

        let hash = PasswordService::hash(new_password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        self.accounts
            .update_password(&record.account_id, &hash)
            .await?;
        self.reset_tokens.mark_used(&record.token_digest).await?;

        info!("Password reset for account: {}", record.account_id);
        Ok(())
    }

    /// Exchange a recovery token for a session token. Used by the callback
    /// redirect; the recovery token stays usable until the password is
    /// actually reset.
    pub async fn exchange_callback_token(
        &self,
        token: &str,
    ) -> Result<(String, Uuid), DomainError> {
        let record = self.find_usable_token(token).await?;

        let profile = self
            .profiles
            .find_by_user_id(&record.account_id)
            .await?
            .ok_or(DomainError::ProfileNotFound)?;

        let access_token = self
            .jwt
            .generate_access_token(&record.account_id, profile.role.as_str())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        Ok((access_token, record.account_id))
    }

    pub fn recovery_url(&self, token: &str) -> String {
        format!("{}/api/auth/callback?token={}", self.public_url, token)
    }

    async fn find_usable_token(&self, token: &str) -> Result<PasswordResetToken, DomainError> {
        let digest = reset_token::digest_of(token);
        let record = self
            .reset_tokens
            .find_by_digest(&digest)
            .await?
            .ok_or(DomainError::InvalidResetToken)?;
        if !record.is_usable() {
            warn!("Rejected expired or used recovery token");
            return Err(DomainError::InvalidResetToken);
        }
        Ok(record)
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub access_token: String,
}

/// User info returned in auth responses
#[derive(Debug, Clone, serde::Serialize)]
pub struct UserInfo {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

impl From<&Profile> for UserInfo {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: profile.user_id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            role: profile.role.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthAccount, Role};
    use crate::repositories::account_repository::MockAccountRepository;
    use crate::repositories::mailer::MockMailer;
    use crate::repositories::profile_repository::MockProfileRepository;
    use crate::repositories::reset_token_repository::MockResetTokenRepository;

    fn service(
        accounts: MockAccountRepository,
        profiles: MockProfileRepository,
        reset_tokens: MockResetTokenRepository,
        mailer: MockMailer,
    ) -> AuthService {
        AuthService::new(
            Arc::new(accounts),
            Arc::new(profiles),
            Arc::new(reset_tokens),
            Arc::new(mailer),
            Arc::new(JwtService::new("test-secret".to_string(), 3600)),
            "http://localhost:8080".to_string(),
        )
    }

    fn account_with_password(password: &str) -> AuthAccount {
        AuthAccount::new(
            "claire@exemple.fr".to_string(),
            PasswordService::hash(password).unwrap(),
        )
    }

    fn profile_for(account: &AuthAccount, role: Role) -> Profile {
        Profile::new(
            account.id,
            "Claire".to_string(),
            "Petit".to_string(),
            account.email.clone(),
            None,
            role,
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_login_success_issues_role_token() {
        let account = account_with_password("belle-journee-42!");
        let profile = profile_for(&account, Role::ChargeDeCompte);

        let mut accounts = MockAccountRepository::new();
        let returned = account.clone();
        accounts
            .expect_find_by_email()
            .returning(move |_| Ok(Some(returned.clone())));
        accounts.expect_record_sign_in().returning(|_| Ok(()));

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(profile.clone())));

        let svc = service(
            accounts,
            profiles,
            MockResetTokenRepository::new(),
            MockMailer::new(),
        );
        let result = svc.login("claire@exemple.fr", "belle-journee-42!").await.unwrap();
        assert_eq!(result.user.role, "charge_de_compte");
        assert!(!result.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password_rejected() {
        let account = account_with_password("belle-journee-42!");
        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(move |_| Ok(Some(account.clone())));

        let svc = service(
            accounts,
            MockProfileRepository::new(),
            MockResetTokenRepository::new(),
            MockMailer::new(),
        );
        let err = svc.login("claire@exemple.fr", "autre").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_inactive_profile_rejected() {
        let account = account_with_password("belle-journee-42!");
        let mut profile = profile_for(&account, Role::Client);
        profile.is_active = false;

        let mut accounts = MockAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(move |_| Ok(Some(account.clone())));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .returning(move |_| Ok(Some(profile.clone())));

        let svc = service(
            accounts,
            profiles,
            MockResetTokenRepository::new(),
            MockMailer::new(),
        );
        let err = svc
            .login("claire@exemple.fr", "belle-journee-42!")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AccountNotActive));
    }

    #[tokio::test]
    async fn test_recover_unknown_email_reports_success_without_token() {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));
        let mut reset_tokens = MockResetTokenRepository::new();
        reset_tokens.expect_insert().times(0);

        let svc = service(
            accounts,
            MockProfileRepository::new(),
            reset_tokens,
            MockMailer::new(),
        );
        assert!(svc.recover("inconnu@exemple.fr").await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_with_expired_token_rejected() {
        let mut reset_tokens = MockResetTokenRepository::new();
        reset_tokens.expect_find_by_digest().returning(|digest| {
            let mut record =
                PasswordResetToken::new(digest.to_string(), Uuid::new_v4(), 3600);
            record.expires_at = chrono::Utc::now() - chrono::Duration::seconds(1);
            Ok(Some(record))
        });

        let svc = service(
            MockAccountRepository::new(),
            MockProfileRepository::new(),
            reset_tokens,
            MockMailer::new(),
        );
        let err = svc
            .reset_password("some-token", "corridor-mauve-83-fenetre")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidResetToken));
    }
}
