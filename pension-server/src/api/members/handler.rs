//! Member API Handlers

use axum::extract::State;
use http::StatusCode;
use shared::error::{ApiResponse, AppResult};
use shared::models::{
    BenefitEligibility, MemberCreate, MemberSearch, MemberStatusUpdate, MemberUpdate, MemberView,
};
use shared::pagination::PagedResponse;
use uuid::Uuid;

use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::auth::CurrentUser;
use crate::state::AppState;

/// POST /api/members
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<MemberCreate>,
) -> AppResult<(StatusCode, ApiResponse<MemberView>)> {
    let member = state.services.members.create_member(&payload, &user.id).await?;
    Ok((StatusCode::CREATED, ApiResponse::success(member)))
}

/// GET /api/members
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MemberSearch>,
) -> AppResult<ApiResponse<PagedResponse<MemberView>>> {
    let page = state.services.members.search_members(&query).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/members/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<MemberView>> {
    let member = state.services.members.get_member(id).await?;
    Ok(ApiResponse::success(member))
}

/// PUT /api/members/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<MemberUpdate>,
) -> AppResult<ApiResponse<MemberView>> {
    let member = state
        .services
        .members
        .update_member(id, &payload, &user.id)
        .await?;
    Ok(ApiResponse::success(member))
}

/// PUT /api/members/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<MemberStatusUpdate>,
) -> AppResult<ApiResponse<MemberView>> {
    let member = state
        .services
        .members
        .update_member_status(id, payload.status, &user.id)
        .await?;
    Ok(ApiResponse::success(member))
}

/// DELETE /api/members/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    user: CurrentUser,
) -> AppResult<StatusCode> {
    state.services.members.soft_delete_member(id, &user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/members/{id}/eligibility
pub async fn get_eligibility(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<BenefitEligibility>> {
    let eligibility = state.services.eligibility.get_eligibility(id).await?;
    Ok(ApiResponse::success(eligibility))
}

/// POST /api/members/{id}/eligibility/refresh
pub async fn refresh_eligibility(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    user: CurrentUser,
) -> AppResult<ApiResponse<BenefitEligibility>> {
    let eligibility = state
        .services
        .eligibility
        .refresh_eligibility(id, &user.id)
        .await?;
    Ok(ApiResponse::success(eligibility))
}
