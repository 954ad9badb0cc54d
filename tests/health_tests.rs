// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn health_json(app: axum::Router) -> serde_json::Value {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_before_any_report() {
    let (app, _state) = common::create_test_app();

    let json = health_json(app).await;

    assert_eq!(json["status"], "ok");
    assert!(json["last_report_at"].is_null());
}

#[tokio::test]
async fn test_health_after_report() {
    let (app, state) = common::create_test_app();
    state.record_report();

    let json = health_json(app).await;

    let last = json["last_report_at"].as_str().unwrap();
    assert!(last.ends_with('Z'), "got {last}");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/data/report")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
