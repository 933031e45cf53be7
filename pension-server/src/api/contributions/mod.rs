//! Contribution API

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/contributions", routes())
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
        .route("/{id}/validate", post(handler::validate))
        .route("/member/{member_id}", get(handler::list_for_member))
        .route("/member/{member_id}/summary", get(handler::summary))
        .route(
            "/member/{member_id}/can-contribute-monthly",
            get(handler::can_contribute_monthly),
        )
}
