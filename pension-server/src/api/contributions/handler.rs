//! Contribution API Handlers

use axum::body::Bytes;
use axum::extract::State;
use chrono::NaiveDate;
use http::StatusCode;
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{
    ContributionCreate, ContributionSearch, ContributionSummary, ContributionUpdate,
    ContributionValidate, ContributionView, MonthlyAvailability,
};
use shared::pagination::PagedResponse;
use uuid::Uuid;

use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::auth::CurrentUser;
use crate::state::AppState;

/// POST /api/contributions
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<ContributionCreate>,
) -> AppResult<(StatusCode, ApiResponse<ContributionView>)> {
    let contribution = state
        .services
        .contributions
        .create_contribution(&payload, &user.id)
        .await?;
    Ok((StatusCode::CREATED, ApiResponse::success(contribution)))
}

/// GET /api/contributions
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ContributionSearch>,
) -> AppResult<ApiResponse<PagedResponse<ContributionView>>> {
    let page = state.services.contributions.search_contributions(&query).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/contributions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<ContributionView>> {
    let contribution = state.services.contributions.get_contribution(id).await?;
    Ok(ApiResponse::success(contribution))
}

/// PUT /api/contributions/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<ContributionUpdate>,
) -> AppResult<ApiResponse<ContributionView>> {
    let contribution = state
        .services
        .contributions
        .update_contribution(id, &payload, &user.id)
        .await?;
    Ok(ApiResponse::success(contribution))
}

/// DELETE /api/contributions/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    user: CurrentUser,
) -> AppResult<StatusCode> {
    state
        .services
        .contributions
        .soft_delete_contribution(id, &user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/contributions/{id}/validate
///
/// The body is optional; an empty body validates without notes.
pub async fn validate(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    user: CurrentUser,
    body: Bytes,
) -> AppResult<ApiResponse<ContributionView>> {
    let payload: ContributionValidate = if body.iter().all(u8::is_ascii_whitespace) {
        ContributionValidate::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::invalid_request(format!("Invalid JSON body: {e}")))?
    };
    let contribution = state
        .services
        .contributions
        .validate_contribution(id, payload.notes, &user.id)
        .await?;
    Ok(ApiResponse::success(contribution))
}

/// GET /api/contributions/member/{member_id}
pub async fn list_for_member(
    State(state): State<AppState>,
    ApiPath(member_id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<Vec<ContributionView>>> {
    let contributions = state
        .services
        .contributions
        .get_member_contributions(member_id)
        .await?;
    Ok(ApiResponse::success(contributions))
}

/// GET /api/contributions/member/{member_id}/summary
pub async fn summary(
    State(state): State<AppState>,
    ApiPath(member_id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<ContributionSummary>> {
    let summary = state
        .services
        .contributions
        .get_member_contribution_summary(member_id)
        .await?;
    Ok(ApiResponse::success(summary))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCheckQuery {
    /// Defaults to today
    pub contribution_date: Option<NaiveDate>,
}

/// GET /api/contributions/member/{member_id}/can-contribute-monthly
pub async fn can_contribute_monthly(
    State(state): State<AppState>,
    ApiPath(member_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<MonthlyCheckQuery>,
) -> AppResult<ApiResponse<MonthlyAvailability>> {
    let date = query
        .contribution_date
        .unwrap_or_else(shared::util::today);
    let can_contribute = state
        .services
        .contributions
        .can_make_monthly_contribution(member_id, date)
        .await?;
    Ok(ApiResponse::success(MonthlyAvailability { can_contribute }))
}
