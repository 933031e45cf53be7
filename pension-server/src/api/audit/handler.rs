//! Audit trail API Handlers

use axum::extract::State;
use shared::error::{ApiResponse, AppResult};
use shared::models::{EntityType, TransactionLog};
use uuid::Uuid;

use crate::api::extract::ApiPath;
use crate::state::AppState;

/// GET /api/audit/{entity_type}/{entity_id}, oldest entry first
pub async fn history(
    State(state): State<AppState>,
    ApiPath((entity_type, entity_id)): ApiPath<(EntityType, Uuid)>,
) -> AppResult<ApiResponse<Vec<TransactionLog>>> {
    let entries = state
        .services
        .audit
        .list_entity_history(entity_type, entity_id)
        .await?;
    Ok(ApiResponse::success(entries))
}
