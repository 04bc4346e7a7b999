// ============================================================================
// Portal Infrastructure - PostgreSQL Appointment Repository
// File: crates/portal-infrastructure/src/database/postgres/appointment_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use portal_core::domain::{Appointment, AppointmentStatus};
use portal_core::error::DomainError;
use portal_core::repositories::AppointmentRepository;

pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub kind: String,
    pub date: DateTime<Utc>,
    pub status: String,
    pub location: Option<String>,
    pub action_label: Option<String>,
    pub action_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: row.id,
            client_id: row.client_id,
            kind: row.kind,
            date: row.date,
            status: AppointmentStatus::from_str(&row.status).unwrap_or_default(),
            location: row.location,
            action_label: row.action_label,
            action_url: row.action_url,
            created_at: row.created_at,
        }
    }
}

const APPOINTMENT_COLUMNS: &str = r#"
    id, client_id, kind, date, status,
    location, action_label, action_url, created_at
"#;

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Appointment>, DomainError> {
        let row: Option<AppointmentRow> = sqlx::query_as(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding appointment: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_for_client(&self, client_id: &Uuid) -> Result<Vec<Appointment>, DomainError> {
        let rows: Vec<AppointmentRow> = sqlx::query_as(&format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS} FROM appointments
            WHERE client_id = $1
            ORDER BY date ASC
            "#
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing appointments: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, appointment: &Appointment) -> Result<Appointment, DomainError> {
        let row: AppointmentRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO appointments (
                id, client_id, kind, date, status,
                location, action_label, action_url, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(appointment.id)
        .bind(appointment.client_id)
        .bind(&appointment.kind)
        .bind(appointment.date)
        .bind(appointment.status.as_str())
        .bind(&appointment.location)
        .bind(&appointment.action_label)
        .bind(&appointment.action_url)
        .bind(appointment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating appointment: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn update(&self, appointment: &Appointment) -> Result<Appointment, DomainError> {
        let row: AppointmentRow = sqlx::query_as(&format!(
            r#"
            UPDATE appointments
            SET
                kind = $2,
                date = $3,
                status = $4,
                location = $5,
                action_label = $6,
                action_url = $7
            WHERE id = $1
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(appointment.id)
        .bind(&appointment.kind)
        .bind(appointment.date)
        .bind(appointment.status.as_str())
        .bind(&appointment.location)
        .bind(&appointment.action_label)
        .bind(&appointment.action_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating appointment: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting appointment: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    async fn delete_for_client(&self, client_id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM appointments WHERE client_id = $1")
            .bind(client_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting client appointments: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
