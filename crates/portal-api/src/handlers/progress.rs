//! Business progress handlers

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use portal_core::domain::{BusinessProgress, ProgressStatus, ProgressStep};

use crate::error::ApiError;
use crate::middleware::{require_client_manage, require_client_read, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// A client's progress board - GET /api/clients/{client_id}/progress
///
/// Always returns the five fixed steps; steps without a stored row default
/// to "à venir".
pub async fn list_for_client(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<BusinessProgress>>>, ApiError> {
    require_client_read(&state, &user, &client_id).await?;

    let stored = state.progress.list_for_client(&client_id).await?;
    let board = ProgressStep::ALL
        .iter()
        .map(|step| {
            stored
                .iter()
                .find(|p| p.step == *step)
                .cloned()
                .unwrap_or_else(|| {
                    BusinessProgress::new(client_id, *step, ProgressStatus::AVenir, None)
                })
        })
        .collect();

    Ok(Json(ApiResponse::success(board)))
}

#[derive(Debug, Deserialize)]
pub struct UpsertProgressRequest {
    pub step: ProgressStep,
    pub status: ProgressStatus,
    pub date: Option<DateTime<Utc>>,
}

/// Upsert one step - PUT /api/clients/{client_id}/progress
pub async fn upsert_progress(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<UpsertProgressRequest>,
) -> Result<Json<ApiResponse<BusinessProgress>>, ApiError> {
    require_client_manage(&state, &user, &client_id).await?;

    let progress =
        BusinessProgress::new(client_id, payload.step, payload.status, payload.date);
    let saved = state.progress.upsert(&progress).await?;
    Ok(Json(ApiResponse::success(saved)))
}
