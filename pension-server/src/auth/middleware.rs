//! Authentication middleware

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use shared::error::AppError;

use super::{CurrentUser, JwtError, JwtService};
use crate::security_log;
use crate::state::AppState;

/// Require a valid bearer token on every `/api/` route except login.
///
/// On success the [`CurrentUser`] is inserted into the request extensions.
/// Missing header, malformed header, bad signature and expiry all answer 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || path == "/api/auth/login" {
        return Ok(next.run(req).await);
    }

    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match header {
        Some(h) => JwtService::extract_from_header(h).ok_or_else(|| {
            security_log!(WARN, "auth_malformed", uri = %req.uri());
            AppError::invalid_token("Invalid authorization header")
        })?,
        None => {
            security_log!(WARN, "auth_missing", uri = %req.uri());
            return Err(AppError::not_authenticated());
        }
    };

    match state.jwt.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(WARN, "auth_failed", error = %e, uri = %req.uri());
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Handlers take `CurrentUser` directly; the middleware has already
/// validated the token.
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}
