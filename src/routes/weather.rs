// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Station upload route.

use crate::middleware::require_station_auth;
use crate::models::WeatherReport;
use crate::services::bridge;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Weather upload routes, guarded by the station credential check.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/update_weather", get(update_weather))
        .route_layer(middleware::from_fn_with_state(state, require_station_auth))
}

/// Accept one station upload (GET with readings as query params).
///
/// Always answers 200 once authenticated; per-sensor problems are logged,
/// and the console has no use for them anyway.
async fn update_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    let report = WeatherReport::from_params(params);
    tracing::debug!(params = ?report.loggable_params(), "incoming payload");

    bridge::forward_report(&state.mqtt, &state.config, &report).await;
    state.record_report();

    StatusCode::OK
}
