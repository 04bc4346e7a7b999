// ============================================================================
// Portal Infrastructure - PostgreSQL Business Progress Repository
// File: crates/portal-infrastructure/src/database/postgres/progress_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use portal_core::domain::{BusinessProgress, ProgressStatus, ProgressStep};
use portal_core::error::DomainError;
use portal_core::repositories::ProgressRepository;

pub struct PgProgressRepository {
    pool: PgPool,
}

impl PgProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProgressRow {
    pub client_id: Uuid,
    pub step: String,
    pub status: String,
    pub date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProgressRow> for BusinessProgress {
    fn from(row: ProgressRow) -> Self {
        BusinessProgress {
            client_id: row.client_id,
            step: ProgressStep::from_str(&row.step).unwrap_or_default(),
            status: ProgressStatus::from_str(&row.status).unwrap_or_default(),
            date: row.date,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProgressRepository for PgProgressRepository {
    async fn list_for_client(
        &self,
        client_id: &Uuid,
    ) -> Result<Vec<BusinessProgress>, DomainError> {
        let rows: Vec<ProgressRow> = sqlx::query_as(
            r#"
            SELECT client_id, step, status, date, updated_at
            FROM business_progress
            WHERE client_id = $1
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing progress: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut progress: Vec<BusinessProgress> = rows.into_iter().map(|r| r.into()).collect();
        // Dashboard order is the fixed step order, not insertion order
        progress.sort_by_key(|p| {
            ProgressStep::ALL.iter().position(|s| *s == p.step).unwrap_or(usize::MAX)
        });
        Ok(progress)
    }

    async fn upsert(&self, progress: &BusinessProgress) -> Result<BusinessProgress, DomainError> {
        let row: ProgressRow = sqlx::query_as(
            r#"
            INSERT INTO business_progress (client_id, step, status, date, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (client_id, step) DO UPDATE
            SET
                status = EXCLUDED.status,
                date = EXCLUDED.date,
                updated_at = EXCLUDED.updated_at
            RETURNING client_id, step, status, date, updated_at
            "#,
        )
        .bind(progress.client_id)
        .bind(progress.step.as_str())
        .bind(progress.status.as_str())
        .bind(progress.date)
        .bind(progress.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error upserting progress: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete_for_client(&self, client_id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM business_progress WHERE client_id = $1")
            .bind(client_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting client progress: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
