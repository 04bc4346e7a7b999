//! Authentication middleware and role guards
//!
//! The middleware turns a Bearer token into an `AuthUser` request extension.
//! Access decisions dispatch over the closed `Role` enum in one place, so
//! handlers never test role strings themselves.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use portal_core::domain::Role;
use portal_security::jwt::JwtService;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub role: Role,
}

pub async fn auth_middleware(
    Extension(jwt): Extension<Arc<JwtService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Bearer header for API callers, session cookie for the callback flow
    let bearer = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let token = match bearer {
        Some(token) => token,
        None => session_cookie(&request)
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?,
    };

    let claims = jwt
        .validate_token(&token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let account_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| ApiError::Unauthorized("Malformed token subject".to_string()))?;
    let role = Role::from_str(&claims.role)
        .ok_or_else(|| ApiError::Unauthorized("Unknown role".to_string()))?;

    request.extensions_mut().insert(AuthUser { account_id, role });
    Ok(next.run(request).await)
}

fn session_cookie(request: &Request) -> Option<String> {
    let cookies = request
        .headers()
        .get(axum::http::header::COOKIE)?
        .to_str()
        .ok()?;
    cookies.split(';').find_map(|pair| {
        pair.trim()
            .strip_prefix("portal_session=")
            .map(str::to_string)
    })
}

pub fn require_admin(user: &AuthUser) -> Result<(), ApiError> {
    match user.role {
        Role::Admin => Ok(()),
        Role::ChargeDeCompte | Role::Client => {
            Err(ApiError::Forbidden("Administrator access required".to_string()))
        }
    }
}

/// Read access to a client's data: the admin, the assigned manager, or the
/// client themselves.
pub async fn require_client_read(
    state: &AppState,
    user: &AuthUser,
    client_id: &Uuid,
) -> Result<(), ApiError> {
    match user.role {
        Role::Admin => Ok(()),
        Role::Client if user.account_id == *client_id => Ok(()),
        Role::Client => Err(ApiError::Forbidden(
            "Clients only access their own data".to_string(),
        )),
        Role::ChargeDeCompte => require_assigned(state, user, client_id).await,
    }
}

/// Write access to a client's data: the admin or the assigned manager.
pub async fn require_client_manage(
    state: &AppState,
    user: &AuthUser,
    client_id: &Uuid,
) -> Result<(), ApiError> {
    match user.role {
        Role::Admin => Ok(()),
        Role::Client => Err(ApiError::Forbidden(
            "Managed by your account manager".to_string(),
        )),
        Role::ChargeDeCompte => require_assigned(state, user, client_id).await,
    }
}

async fn require_assigned(
    state: &AppState,
    user: &AuthUser,
    client_id: &Uuid,
) -> Result<(), ApiError> {
    if user.account_id == *client_id {
        // Managers read their own profile through the same guard
        return Ok(());
    }
    let profile = state
        .profiles
        .find_by_user_id(client_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;
    if profile.assigned_to == Some(user.account_id) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Client is not assigned to you".to_string(),
        ))
    }
}
