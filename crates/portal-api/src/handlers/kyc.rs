//! KYC form and review handlers

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use portal_core::domain::{KycProfile, Role};
use portal_core::services::KycSubmission;

use crate::error::ApiError;
use crate::middleware::{require_client_manage, require_client_read, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Fetch a client's KYC form - GET /api/kyc/{user_id}
pub async fn get_kyc(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Option<KycProfile>>>, ApiError> {
    require_client_read(&state, &user, &user_id).await?;

    let kyc = state.kyc.find_by_user_id(&user_id).await?;
    Ok(Json(ApiResponse::success(kyc)))
}

/// Submit the KYC form - PUT /api/kyc/{user_id}
///
/// Upserts the row back to `pending`; a fresh submission never keeps an
/// earlier rejection comment.
pub async fn submit_kyc(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<KycSubmission>,
) -> Result<Json<ApiResponse<KycProfile>>, ApiError> {
    if user.role != Role::Admin && user.account_id != user_id {
        return Err(ApiError::Forbidden(
            "Clients submit their own KYC form".to_string(),
        ));
    }

    let saved = state.review.submit(&user_id, payload).await?;
    Ok(Json(ApiResponse::success(saved)))
}

/// Approve a submission - POST /api/kyc/{user_id}/approve
pub async fn approve_kyc(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<KycProfile>>, ApiError> {
    require_client_manage(&state, &user, &user_id).await?;

    let saved = state.review.approve(&user_id).await?;
    Ok(Json(ApiResponse::success(saved)))
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub comment: String,
}

/// Reject a submission with a comment - POST /api/kyc/{user_id}/reject
pub async fn reject_kyc(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> Result<Json<ApiResponse<KycProfile>>, ApiError> {
    require_client_manage(&state, &user, &user_id).await?;

    let saved = state.review.reject(&user_id, &payload.comment).await?;
    Ok(Json(ApiResponse::success(saved)))
}
