// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Station credential check.
//!
//! The console sends its login as `ID` / `PASSWORD` query parameters on every
//! upload; there is no header-based auth to fall back on.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Middleware that rejects uploads whose `ID` / `PASSWORD` don't match config.
pub async fn require_station_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let params = match Query::<HashMap<String, String>>::try_from_uri(request.uri()) {
        Ok(Query(params)) => params,
        Err(e) => {
            return AppError::BadRequest(format!("Malformed query string: {e}")).into_response();
        }
    };

    let id = params.get("ID").map(String::as_str);
    let password = params.get("PASSWORD").map(String::as_str);

    if !credentials_match(
        id,
        password,
        &state.config.station_id,
        &state.config.station_password,
    ) {
        tracing::warn!(
            station_id = ?id,
            password_present = password.is_some(),
            "Rejected weather upload with invalid credentials"
        );
        return AppError::InvalidCredentials.into_response();
    }

    next.run(request).await
}

/// Compare both fields without short-circuiting on the first mismatch.
pub fn credentials_match(
    id: Option<&str>,
    password: Option<&str>,
    expected_id: &str,
    expected_password: &str,
) -> bool {
    let (Some(id), Some(password)) = (id, password) else {
        return false;
    };

    let id_ok = id.as_bytes().ct_eq(expected_id.as_bytes());
    let password_ok = password.as_bytes().ct_eq(expected_password.as_bytes());
    (id_ok & password_ok).into()
}
