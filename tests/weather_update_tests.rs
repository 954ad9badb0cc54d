// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for the station upload endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

mod common;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn payload_for(state: &ambient_mqtt_bridge::AppState, sensor: &str) -> Option<String> {
    let topic = state.config.state_topic(sensor);
    state
        .mqtt
        .published()
        .into_iter()
        .find(|m| m.topic == topic)
        .map(|m| m.payload)
}

#[tokio::test]
async fn test_full_upload_publishes_every_sensor() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(get(&format!("/update_weather?{}", common::SAMPLE_UPLOAD)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let published = state.mqtt.published();
    // 18 station readings + derived feels-like
    assert_eq!(published.len(), 19);
    assert!(published.iter().all(|m| !m.retain));

    assert_eq!(payload_for(&state, "temperature").as_deref(), Some("84.2"));
    assert_eq!(payload_for(&state, "humidity").as_deref(), Some("70"));
    assert_eq!(payload_for(&state, "windSpeed").as_deref(), Some("4.47"));
    assert_eq!(payload_for(&state, "rainLifetime").as_deref(), Some("38.520"));
    assert_eq!(payload_for(&state, "UV").as_deref(), Some("5"));
    assert_eq!(payload_for(&state, "pressure").as_deref(), Some("1002.7"));
    assert_eq!(
        payload_for(&state, "relativePressure").as_deref(),
        Some("1013.1")
    );
    assert_eq!(payload_for(&state, "feelsLike").as_deref(), Some("90.9"));
}

#[tokio::test]
async fn test_upload_records_last_report_time() {
    let (app, state) = common::create_test_app();
    assert!(state.last_report().is_none());

    let response = app
        .oneshot(get("/update_weather?ID=local&PASSWORD=key&tempf=50.0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.last_report().is_some());
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(get("/update_weather?ID=local&PASSWORD=guess&tempf=70.0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.mqtt.published().is_empty());
    assert!(state.last_report().is_none());

    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_missing_credentials_rejected() {
    let (app, state) = common::create_test_app();

    let response = app.oneshot(get("/update_weather?tempf=70.0")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.mqtt.published().is_empty());
}

#[tokio::test]
async fn test_no_query_rejected() {
    let (app, _state) = common::create_test_app();

    let response = app.oneshot(get("/update_weather")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_values_skipped_but_request_succeeds() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(get(
            "/update_weather?ID=local&PASSWORD=key&tempf=oops&humidity=55.5&winddir=90",
        ))
        .await
        .unwrap();

    // Still 200 so the console keeps uploading
    assert_eq!(response.status(), StatusCode::OK);

    let published = state.mqtt.published();
    assert_eq!(published.len(), 1);
    assert_eq!(payload_for(&state, "windDir").as_deref(), Some("90"));
    assert!(payload_for(&state, "temperature").is_none());
    assert!(payload_for(&state, "feelsLike").is_none());
}

#[tokio::test]
async fn test_post_not_allowed() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/update_weather?ID=local&PASSWORD=key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
