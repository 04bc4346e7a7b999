//! Upcoming action handlers

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use portal_core::domain::UpcomingAction;

use crate::error::ApiError;
use crate::middleware::{require_client_manage, require_client_read, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// A client's to-do list - GET /api/clients/{client_id}/actions
pub async fn list_for_client(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<UpcomingAction>>>, ApiError> {
    require_client_read(&state, &user, &client_id).await?;

    let actions = state.actions.list_for_client(&client_id).await?;
    Ok(Json(ApiResponse::success(actions)))
}

#[derive(Debug, Deserialize)]
pub struct CreateActionRequest {
    pub client_id: Uuid,
    pub title: String,
}

/// Add an action - POST /api/actions
pub async fn create_action(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateActionRequest>,
) -> Result<Json<ApiResponse<UpcomingAction>>, ApiError> {
    require_client_manage(&state, &user, &payload.client_id).await?;

    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }

    let action = UpcomingAction::new(payload.client_id, payload.title);
    let created = state.actions.create(&action).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// Remove an action - DELETE /api/actions/{id}
pub async fn delete_action(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let action = state
        .actions
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Action not found".to_string()))?;

    require_client_manage(&state, &user, &action.client_id).await?;

    state.actions.delete(&id).await?;
    Ok(Json(ApiResponse::success(())))
}
