//! API 路由

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::handler;
use super::middleware::{identity_middleware, request_span, trace_middleware};
use super::response::handle_panic;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/rest", post(handler::invoke))
        .route("/rest/", post(handler::invoke))
        .route("/rest/{*path}", post(handler::invoke))
        .route_layer(from_fn_with_state(state.identity.clone(), identity_middleware))
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(from_fn(trace_middleware))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn render_metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}
