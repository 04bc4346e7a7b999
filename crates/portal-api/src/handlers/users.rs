//! User provisioning and document-submission handlers

use axum::{
    extract::{Extension, State},
    Json,
};
use serde::Deserialize;

use portal_core::domain::Profile;
use portal_core::services::NewUser;

use crate::error::ApiError;
use crate::middleware::{require_admin, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create user handler - POST /api/users/create
pub async fn create_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewUser>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    require_admin(&user)?;

    let profile = state.provisioning.create_user(payload).await?;
    Ok(Json(ApiResponse::success(profile)))
}

#[derive(Debug, Deserialize)]
pub struct DocumentSubmissionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub email: String,
}

/// Back-office submission notice - POST /api/users/document-submission
pub async fn document_submission(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    Json(payload): Json<DocumentSubmissionRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if payload.kind.is_empty() || payload.email.is_empty() {
        return Err(ApiError::BadRequest(
            "type and email are required".to_string(),
        ));
    }

    state
        .review
        .notify_submission(&payload.kind, &payload.email)
        .await?;
    Ok(Json(ApiResponse::success(())))
}
