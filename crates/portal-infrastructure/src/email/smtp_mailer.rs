//! SMTP mailer
//!
//! Implements the `Mailer` port over lettre's async SMTP transport, with
//! handlebars-rendered HTML bodies.

use async_trait::async_trait;
use handlebars::Handlebars;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::json;
use tracing::{debug, error};

use portal_core::error::DomainError;
use portal_core::repositories::Mailer;
use portal_shared::config::EmailSettings;

use super::templates;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    backoffice: Mailbox,
    templates: Handlebars<'static>,
}

impl SmtpMailer {
    pub fn new(settings: &EmailSettings) -> Result<Self, DomainError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
            .map_err(|e| DomainError::EmailError(e.to_string()))?
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.smtp_username.clone(),
                settings.smtp_password.clone(),
            ))
            .build();

        let from = settings
            .from_address
            .parse()
            .map_err(|_| DomainError::EmailError("invalid from address".to_string()))?;
        let backoffice = settings
            .backoffice_address
            .parse()
            .map_err(|_| DomainError::EmailError("invalid backoffice address".to_string()))?;

        let mut registry = Handlebars::new();
        for (name, template) in [
            ("welcome", templates::WELCOME),
            ("password_recovery", templates::PASSWORD_RECOVERY),
            ("document_submitted", templates::DOCUMENT_SUBMITTED),
            ("documents_validated", templates::DOCUMENTS_VALIDATED),
            ("documents_rejected", templates::DOCUMENTS_REJECTED),
        ] {
            registry
                .register_template_string(name, template)
                .map_err(|e| DomainError::EmailError(e.to_string()))?;
        }

        Ok(Self {
            transport,
            from,
            backoffice,
            templates: registry,
        })
    }

    async fn send(&self, to: Mailbox, subject: &str, html: String) -> Result<(), DomainError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| DomainError::EmailError(e.to_string()))?;

        self.transport.send(message).await.map_err(|e| {
            error!("SMTP send failed to {}: {}", to, e);
            DomainError::EmailError(e.to_string())
        })?;

        debug!("Email sent: {} -> {}", subject, to);
        Ok(())
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, DomainError> {
        self.templates
            .render(name, data)
            .map_err(|e| DomainError::EmailError(e.to_string()))
    }

    fn mailbox(address: &str) -> Result<Mailbox, DomainError> {
        address
            .parse()
            .map_err(|_| DomainError::EmailError(format!("invalid address: {}", address)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_welcome(
        &self,
        to: &str,
        first_name: &str,
        recovery_url: &str,
    ) -> Result<(), DomainError> {
        let html = self.render(
            "welcome",
            &json!({ "first_name": first_name, "recovery_url": recovery_url }),
        )?;
        self.send(Self::mailbox(to)?, "Bienvenue dans votre espace client", html)
            .await
    }

    async fn send_password_recovery(
        &self,
        to: &str,
        recovery_url: &str,
    ) -> Result<(), DomainError> {
        let html = self.render("password_recovery", &json!({ "recovery_url": recovery_url }))?;
        self.send(
            Self::mailbox(to)?,
            "Réinitialisation de votre mot de passe",
            html,
        )
        .await
    }

    async fn send_document_submitted(
        &self,
        document_kind: &str,
        client_email: &str,
    ) -> Result<(), DomainError> {
        let html = self.render(
            "document_submitted",
            &json!({ "document_kind": document_kind, "client_email": client_email }),
        )?;
        self.send(self.backoffice.clone(), "Nouveau document soumis", html)
            .await
    }

    async fn send_documents_validated(
        &self,
        to: &str,
        first_name: &str,
    ) -> Result<(), DomainError> {
        let html = self.render("documents_validated", &json!({ "first_name": first_name }))?;
        self.send(Self::mailbox(to)?, "Vos documents ont été validés", html)
            .await
    }

    async fn send_documents_rejected(
        &self,
        to: &str,
        first_name: &str,
        reason: &str,
    ) -> Result<(), DomainError> {
        let html = self.render(
            "documents_rejected",
            &json!({ "first_name": first_name, "reason": reason }),
        )?;
        self.send(Self::mailbox(to)?, "Vos documents nécessitent une correction", html)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        SmtpMailer::new(&EmailSettings {
            smtp_host: "smtp.exemple.fr".to_string(),
            smtp_port: 587,
            smtp_username: "user".to_string(),
            smtp_password: "pass".to_string(),
            from_address: "Portail <no-reply@exemple.fr>".to_string(),
            backoffice_address: "backoffice@exemple.fr".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_rejection_template_carries_reason() {
        let mailer = mailer();
        let html = mailer
            .render(
                "documents_rejected",
                &json!({ "first_name": "Karim", "reason": "photo illisible" }),
            )
            .unwrap();
        assert!(html.contains("photo illisible"));
        assert!(html.contains("Karim"));
    }

    #[test]
    fn test_recovery_template_carries_link() {
        let mailer = mailer();
        let html = mailer
            .render(
                "password_recovery",
                &json!({ "recovery_url": "http://localhost/api/auth/callback?token=abc" }),
            )
            .unwrap();
        assert!(html.contains("callback?token=abc"));
    }
}
