//! Auth API Handlers

use axum::extract::State;
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, AppResult};

use crate::api::extract::ApiJson;
use crate::auth::{ADMIN_ROLE, CurrentUser, verify_password};
use crate::security_log;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: CurrentUser,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let email = req.email.trim().to_lowercase();
    let admin = state.admin.clone();

    let email_ok = email == admin.email.to_lowercase();
    let password = req.password;
    let hash = admin.password_hash.clone();
    let password_ok = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password check failed: {e}")))?;

    if !(email_ok && password_ok) {
        security_log!(WARN, "login_failed", email = %email);
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt
        .generate_token(&admin.email, &admin.email, ADMIN_ROLE)
        .map_err(|e| AppError::internal(e.to_string()))?;

    security_log!(INFO, "login_success", email = %admin.email);
    Ok(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: state.jwt.expiration_minutes() * 60,
        user: CurrentUser {
            id: admin.email.clone(),
            email: admin.email.clone(),
            role: ADMIN_ROLE.to_string(),
        },
    }))
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> ApiResponse<CurrentUser> {
    ApiResponse::success(user)
}
