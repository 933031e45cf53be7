//! Employer API Handlers

use axum::extract::State;
use http::StatusCode;
use shared::error::{ApiResponse, AppResult};
use shared::models::{Employer, EmployerCreate, EmployerSearch, EmployerUpdate};
use shared::pagination::PagedResponse;
use uuid::Uuid;

use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::auth::CurrentUser;
use crate::state::AppState;

/// POST /api/employers
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<EmployerCreate>,
) -> AppResult<(StatusCode, ApiResponse<Employer>)> {
    let employer = state
        .services
        .employers
        .create_employer(&payload, &user.id)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::success(employer)))
}

/// GET /api/employers
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EmployerSearch>,
) -> AppResult<ApiResponse<PagedResponse<Employer>>> {
    let page = state.services.employers.search_employers(&query).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/employers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<Employer>> {
    let employer = state.services.employers.get_employer(id).await?;
    Ok(ApiResponse::success(employer))
}

/// PUT /api/employers/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<EmployerUpdate>,
) -> AppResult<ApiResponse<Employer>> {
    let employer = state
        .services
        .employers
        .update_employer(id, &payload, &user.id)
        .await?;
    Ok(ApiResponse::success(employer))
}

/// DELETE /api/employers/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    user: CurrentUser,
) -> AppResult<StatusCode> {
    state.services.employers.soft_delete_employer(id, &user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
