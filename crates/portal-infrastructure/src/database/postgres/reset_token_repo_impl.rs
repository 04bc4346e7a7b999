// ============================================================================
// Portal Infrastructure - PostgreSQL Reset Token Repository
// File: crates/portal-infrastructure/src/database/postgres/reset_token_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use portal_core::domain::PasswordResetToken;
use portal_core::error::DomainError;
use portal_core::repositories::ResetTokenRepository;

pub struct PgResetTokenRepository {
    pool: PgPool,
}

impl PgResetTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ResetTokenRow {
    pub token_digest: String,
    pub account_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ResetTokenRow> for PasswordResetToken {
    fn from(row: ResetTokenRow) -> Self {
        PasswordResetToken {
            token_digest: row.token_digest,
            account_id: row.account_id,
            expires_at: row.expires_at,
            used_at: row.used_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ResetTokenRepository for PgResetTokenRepository {
    async fn insert(&self, token: &PasswordResetToken) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens
                (token_digest, account_id, expires_at, used_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&token.token_digest)
        .bind(token.account_id)
        .bind(token.expires_at)
        .bind(token.used_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error inserting reset token: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn find_by_digest(
        &self,
        token_digest: &str,
    ) -> Result<Option<PasswordResetToken>, DomainError> {
        let row: Option<ResetTokenRow> = sqlx::query_as(
            r#"
            SELECT token_digest, account_id, expires_at, used_at, created_at
            FROM password_reset_tokens
            WHERE token_digest = $1
            "#,
        )
        .bind(token_digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding reset token: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn mark_used(&self, token_digest: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE password_reset_tokens SET used_at = NOW() WHERE token_digest = $1")
            .bind(token_digest)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error marking reset token used: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    async fn delete_for_account(&self, account_id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM password_reset_tokens WHERE account_id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting account reset tokens: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
