//! Administration handlers

use axum::{
    extract::{Extension, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{require_admin, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Cascading user deletion - POST /api/admin/delete-user
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<DeleteUserRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    require_admin(&user)?;

    if payload.user_id == user.account_id {
        return Err(ApiError::BadRequest(
            "Administrators cannot delete their own account".to_string(),
        ));
    }

    state.deletion.delete_user(&payload.user_id).await?;
    Ok(Json(ApiResponse::success(())))
}
