//! Appointment handlers

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use portal_core::domain::{Appointment, AppointmentStatus};

use crate::error::ApiError;
use crate::middleware::{require_client_manage, require_client_read, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// A client's appointments - GET /api/clients/{client_id}/appointments
pub async fn list_for_client(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Appointment>>>, ApiError> {
    require_client_read(&state, &user, &client_id).await?;

    let appointments = state.appointments.list_for_client(&client_id).await?;
    Ok(Json(ApiResponse::success(appointments)))
}

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_id: Uuid,
    pub kind: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub location: Option<String>,
    pub action_label: Option<String>,
    pub action_url: Option<String>,
}

/// Create an appointment - POST /api/appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    require_client_manage(&state, &user, &payload.client_id).await?;

    if payload.kind.is_empty() {
        return Err(ApiError::BadRequest("kind is required".to_string()));
    }

    let appointment = Appointment::new(
        payload.client_id,
        payload.kind,
        payload.date,
        payload.status,
        payload.location,
        payload.action_label,
        payload.action_url,
    );
    let created = state.appointments.create(&appointment).await?;
    Ok(Json(ApiResponse::success(created)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub kind: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub location: Option<String>,
    pub action_label: Option<String>,
    pub action_url: Option<String>,
}

/// Update an appointment - PUT /api/appointments/{id}
pub async fn update_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    let mut appointment = state
        .appointments
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Appointment not found".to_string()))?;

    require_client_manage(&state, &user, &appointment.client_id).await?;

    if let Some(kind) = payload.kind {
        appointment.kind = kind;
    }
    if let Some(date) = payload.date {
        appointment.date = date;
    }
    if let Some(status) = payload.status {
        appointment.status = status;
    }
    if payload.location.is_some() {
        appointment.location = payload.location;
    }
    if payload.action_label.is_some() {
        appointment.action_label = payload.action_label;
    }
    if payload.action_url.is_some() {
        appointment.action_url = payload.action_url;
    }

    let updated = state.appointments.update(&appointment).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// Delete an appointment - DELETE /api/appointments/{id}
pub async fn delete_appointment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let appointment = state
        .appointments
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Appointment not found".to_string()))?;

    require_client_manage(&state, &user, &appointment.client_id).await?;

    state.appointments.delete(&id).await?;
    Ok(Json(ApiResponse::success(())))
}
