// ============================================================================
// Portal Infrastructure - PostgreSQL Upcoming Action Repository
// File: crates/portal-infrastructure/src/database/postgres/action_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use portal_core::domain::UpcomingAction;
use portal_core::error::DomainError;
use portal_core::repositories::ActionRepository;

pub struct PgActionRepository {
    pool: PgPool,
}

impl PgActionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActionRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<ActionRow> for UpcomingAction {
    fn from(row: ActionRow) -> Self {
        UpcomingAction {
            id: row.id,
            client_id: row.client_id,
            title: row.title,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ActionRepository for PgActionRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UpcomingAction>, DomainError> {
        let row: Option<ActionRow> = sqlx::query_as(
            "SELECT id, client_id, title, created_at FROM upcoming_actions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding action: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_for_client(&self, client_id: &Uuid) -> Result<Vec<UpcomingAction>, DomainError> {
        let rows: Vec<ActionRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, title, created_at
            FROM upcoming_actions
            WHERE client_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing actions: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, action: &UpcomingAction) -> Result<UpcomingAction, DomainError> {
        let row: ActionRow = sqlx::query_as(
            r#"
            INSERT INTO upcoming_actions (id, client_id, title, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, client_id, title, created_at
            "#,
        )
        .bind(action.id)
        .bind(action.client_id)
        .bind(&action.title)
        .bind(action.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating action: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM upcoming_actions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting action: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    async fn delete_for_client(&self, client_id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM upcoming_actions WHERE client_id = $1")
            .bind(client_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting client actions: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
