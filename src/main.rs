// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ambient Weather → MQTT bridge server
//!
//! Accepts weather station uploads over HTTP and republishes them as
//! Home Assistant sensors over MQTT.

use ambient_mqtt_bridge::{
    config::Config,
    services::{announce_sensors, MqttService},
    AppState,
};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
    })?;
    tracing::info!(port = config.port, "Starting Ambient Weather MQTT bridge");

    let mqtt = MqttService::connect(&config).await.inspect_err(|e| {
        tracing::error!(error = %e, "Unable to connect to MQTT broker");
    })?;

    // Discovery configs are retained, so Home Assistant picks them up even
    // if it starts after us.
    announce_sensors(&mqtt, &config).await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to publish sensor discovery configs");
    })?;

    let state = Arc::new(AppState::new(config.clone(), mqtt));
    let app = ambient_mqtt_bridge::routes::create_router(state.clone());

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await.inspect_err(|e| {
        tracing::error!(error = %e, address = %addr, "Failed to bind listener");
    })?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = state.mqtt.disconnect().await {
        tracing::warn!(error = %e, "MQTT disconnect failed");
    }
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("ambient_mqtt_bridge=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, shutting down");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, shutting down");
        },
    }
}
