// ============================================================================
// Portal Infrastructure - PostgreSQL Profile Repository
// File: crates/portal-infrastructure/src/database/postgres/profile_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use portal_core::domain::{Profile, Role};
use portal_core::error::DomainError;
use portal_core::repositories::ProfileRepository;

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ProfileRow {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub assigned_to: Option<Uuid>,
    pub calendly_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            role: Role::from_str(&row.role).unwrap_or_default(),
            is_active: row.is_active,
            assigned_to: row.assigned_to,
            calendly_link: row.calendly_link,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

const PROFILE_COLUMNS: &str = r#"
    user_id, first_name, last_name, email, phone,
    role, is_active, assigned_to, calendly_link,
    created_at, modified_at
"#;

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding profile by user_id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding profile by email: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_all(&self) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing profiles: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_clients_of(&self, manager_id: &Uuid) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            r#"
            SELECT {PROFILE_COLUMNS} FROM profiles
            WHERE assigned_to = $1 AND role = 'client'
            ORDER BY created_at DESC
            "#
        ))
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing clients of manager: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, profile: &Profile) -> Result<Profile, DomainError> {
        info!("Creating profile for: {}", profile.email);

        let row: ProfileRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO profiles (
                user_id, first_name, last_name, email, phone,
                role, is_active, assigned_to, calendly_link,
                created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(profile.user_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(profile.role.as_str())
        .bind(profile.is_active)
        .bind(profile.assigned_to)
        .bind(&profile.calendly_link)
        .bind(profile.created_at)
        .bind(profile.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating profile: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn update(&self, profile: &Profile) -> Result<Profile, DomainError> {
        let row: ProfileRow = sqlx::query_as(&format!(
            r#"
            UPDATE profiles
            SET
                first_name = $2,
                last_name = $3,
                email = $4,
                phone = $5,
                role = $6,
                is_active = $7,
                assigned_to = $8,
                calendly_link = $9,
                modified_at = NOW()
            WHERE user_id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(profile.user_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(profile.role.as_str())
        .bind(profile.is_active)
        .bind(profile.assigned_to)
        .bind(&profile.calendly_link)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating profile: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, user_id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting profile: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    async fn clear_assignments(&self, manager_id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE profiles SET assigned_to = NULL WHERE assigned_to = $1")
            .bind(manager_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error clearing assignments: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
