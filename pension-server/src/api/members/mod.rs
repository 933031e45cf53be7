//! Member API

mod handler;

use axum::Router;
use axum::routing::{get, post, put};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/members", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create).get(handler::search))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/eligibility", get(handler::get_eligibility))
        .route("/{id}/eligibility/refresh", post(handler::refresh_eligibility))
}
