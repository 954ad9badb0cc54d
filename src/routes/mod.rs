// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod weather;

use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Request, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    /// RFC3339 time of the last accepted station upload
    pub last_report_at: Option<String>,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        last_report_at: state.last_report().map(format_utc_rfc3339),
    })
}

/// Request span with the path only. The station sends its password in the
/// query string, so the full URI must never be recorded.
fn make_request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version()
    )
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(weather::routes(state.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
