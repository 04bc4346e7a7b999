//! Profile handlers

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use portal_core::domain::{Profile, Role};

use crate::error::ApiError;
use crate::middleware::{require_admin, require_client_read, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// List all profiles - GET /api/profiles (admin)
pub async fn list_profiles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<Profile>>>, ApiError> {
    require_admin(&user)?;
    let profiles = state.profiles.list_all().await?;
    Ok(Json(ApiResponse::success(profiles)))
}

/// Fetch one profile - GET /api/profiles/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    require_client_read(&state, &user, &user_id).await?;

    let profile = state
        .profiles
        .find_by_user_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;
    Ok(Json(ApiResponse::success(profile)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub calendly_link: Option<String>,
    // Admin-only fields
    pub role: Option<Role>,
    pub assigned_to: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// Update a profile - PUT /api/profiles/{user_id}
///
/// Role, assignment, and activation changes are reserved to administrators.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let is_admin = user.role == Role::Admin;
    if !is_admin && user.account_id != user_id {
        return Err(ApiError::Forbidden(
            "Only administrators update other profiles".to_string(),
        ));
    }

    let touches_admin_fields =
        payload.role.is_some() || payload.assigned_to.is_some() || payload.is_active.is_some();
    if touches_admin_fields && !is_admin {
        return Err(ApiError::Forbidden(
            "Role and assignment changes require an administrator".to_string(),
        ));
    }

    let mut profile = state
        .profiles
        .find_by_user_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    if let Some(first_name) = payload.first_name {
        profile.first_name = first_name;
    }
    if let Some(last_name) = payload.last_name {
        profile.last_name = last_name;
    }
    if payload.phone.is_some() {
        profile.phone = payload.phone;
    }
    if payload.calendly_link.is_some() {
        profile.calendly_link = payload.calendly_link;
    }
    if let Some(role) = payload.role {
        profile.role = role;
    }
    if payload.assigned_to.is_some() {
        profile.assigned_to = payload.assigned_to;
    }
    if let Some(is_active) = payload.is_active {
        profile.is_active = is_active;
    }

    let updated = state.profiles.update(&profile).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// A manager's client list - GET /api/managers/{manager_id}/clients
pub async fn manager_clients(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(manager_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Profile>>>, ApiError> {
    match user.role {
        Role::Admin => {}
        Role::ChargeDeCompte if user.account_id == manager_id => {}
        _ => {
            return Err(ApiError::Forbidden(
                "Only the manager or an administrator lists clients".to_string(),
            ))
        }
    }

    let clients = state.profiles.list_clients_of(&manager_id).await?;
    Ok(Json(ApiResponse::success(clients)))
}
