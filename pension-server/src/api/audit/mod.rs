//! Audit trail API

mod handler;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/audit/{entity_type}/{entity_id}", get(handler::history))
}
