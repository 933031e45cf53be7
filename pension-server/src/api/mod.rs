//! HTTP API
//!
//! Thin handlers over the service layer. Every `/api/` route except login
//! requires a bearer token; `/health` is public.

pub mod audit;
pub mod auth;
pub mod contributions;
pub mod employers;
pub mod extract;
pub mod health;
pub mod members;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, no middleware and no state
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(members::router())
        .merge(contributions::router())
        .merge(employers::router())
        .merge(audit::router())
        .merge(auth::router())
        .merge(health::router())
}

/// Fully layered application, used by the server and by router tests
pub fn build_app(state: AppState) -> Router {
    let timeout = state.config.request_timeout;
    build_router()
        // Innermost: token check, injects CurrentUser
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
