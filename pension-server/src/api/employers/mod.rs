//! Employer API

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/employers", routes())
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
}
