//! Authentication HTTP handlers (login, recovery, reset, callback)

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};

use portal_core::services::UserInfo;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authentication response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub access_token: String,
}

/// Login handler - POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let result = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::success(AuthResponse {
        user: result.user,
        access_token: result.access_token,
    })))
}

#[derive(Debug, Deserialize)]
pub struct RecoverRequest {
    pub email: String,
}

/// Password recovery handler - POST /api/recover-password
pub async fn recover_password(
    State(state): State<AppState>,
    Json(payload): Json<RecoverRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::BadRequest("Email is required".to_string()));
    }

    state.auth.recover(&payload.email).await?;
    Ok(Json(ApiResponse::success(())))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Password reset handler - POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .auth
        .reset_password(&payload.token, &payload.new_password)
        .await?;
    Ok(Json(ApiResponse::success(())))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub token: String,
    pub redirect_to: Option<String>,
}

/// Session exchange redirect - GET /api/auth/callback
///
/// Exchanges an emailed recovery token for a session cookie, then redirects
/// to the dashboard (or the caller-supplied path).
pub async fn auth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ApiError> {
    let (access_token, _account_id) = state.auth.exchange_callback_token(&params.token).await?;

    let location = params
        .redirect_to
        .filter(|path| path.starts_with('/'))
        .unwrap_or_else(|| "/update-password".to_string());

    let cookie = format!(
        "portal_session={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        access_token, state.config.jwt.access_token_expiry
    );

    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::SET_COOKIE, cookie)
        .header(header::LOCATION, location)
        .body(axum::body::Body::empty())
        .map_err(|e| ApiError::InternalError(e.to_string()))
}
