//! Transactional mailer trait (port)

use async_trait::async_trait;

use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sent on user creation; the recovery URL lets the user pick a password.
    async fn send_welcome(
        &self,
        to: &str,
        first_name: &str,
        recovery_url: &str,
    ) -> Result<(), DomainError>;

    async fn send_password_recovery(&self, to: &str, recovery_url: &str)
        -> Result<(), DomainError>;

    /// Back-office notice that a client submitted a document.
    async fn send_document_submitted(
        &self,
        document_kind: &str,
        client_email: &str,
    ) -> Result<(), DomainError>;

    async fn send_documents_validated(&self, to: &str, first_name: &str)
        -> Result<(), DomainError>;

    async fn send_documents_rejected(
        &self,
        to: &str,
        first_name: &str,
        reason: &str,
    ) -> Result<(), DomainError>;
}
