// ============================================================================
// Portal Infrastructure - PostgreSQL KYC Profile Repository
// File: crates/portal-infrastructure/src/database/postgres/kyc_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use portal_core::domain::{KycProfile, ReviewStatus};
use portal_core::error::DomainError;
use portal_core::repositories::KycRepository;

pub struct PgKycRepository {
    pool: PgPool,
}

impl PgKycRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct KycRow {
    pub user_id: Uuid,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub passport_path: Option<String>,
    pub id_card_path: Option<String>,
    pub status: String,
    pub comment: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<KycRow> for KycProfile {
    fn from(row: KycRow) -> Self {
        KycProfile {
            user_id: row.user_id,
            birth_date: row.birth_date,
            birth_place: row.birth_place,
            nationality: row.nationality,
            address: row.address,
            city: row.city,
            postal_code: row.postal_code,
            passport_path: row.passport_path,
            id_card_path: row.id_card_path,
            status: ReviewStatus::from_str(&row.status).unwrap_or_default(),
            comment: row.comment,
            submitted_at: row.submitted_at,
            reviewed_at: row.reviewed_at,
        }
    }
}

const KYC_COLUMNS: &str = r#"
    user_id, birth_date, birth_place, nationality, address, city,
    postal_code, passport_path, id_card_path, status, comment,
    submitted_at, reviewed_at
"#;

#[async_trait]
impl KycRepository for PgKycRepository {
    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Option<KycProfile>, DomainError> {
        let row: Option<KycRow> = sqlx::query_as(&format!(
            "SELECT {KYC_COLUMNS} FROM users_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding kyc profile: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn upsert(&self, kyc: &KycProfile) -> Result<KycProfile, DomainError> {
        let row: KycRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users_profiles (
                user_id, birth_date, birth_place, nationality, address, city,
                postal_code, passport_path, id_card_path, status, comment,
                submitted_at, reviewed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE
            SET
                birth_date = EXCLUDED.birth_date,
                birth_place = EXCLUDED.birth_place,
                nationality = EXCLUDED.nationality,
                address = EXCLUDED.address,
                city = EXCLUDED.city,
                postal_code = EXCLUDED.postal_code,
                passport_path = EXCLUDED.passport_path,
                id_card_path = EXCLUDED.id_card_path,
                status = EXCLUDED.status,
                comment = EXCLUDED.comment,
                submitted_at = EXCLUDED.submitted_at,
                reviewed_at = EXCLUDED.reviewed_at
            RETURNING {KYC_COLUMNS}
            "#
        ))
        .bind(kyc.user_id)
        .bind(kyc.birth_date)
        .bind(&kyc.birth_place)
        .bind(&kyc.nationality)
        .bind(&kyc.address)
        .bind(&kyc.city)
        .bind(&kyc.postal_code)
        .bind(&kyc.passport_path)
        .bind(&kyc.id_card_path)
        .bind(kyc.status.as_str())
        .bind(&kyc.comment)
        .bind(kyc.submitted_at)
        .bind(kyc.reviewed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error upserting kyc profile: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn delete(&self, user_id: &Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users_profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting kyc profile: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
