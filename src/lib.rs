// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ambient Weather → MQTT bridge.
//!
//! Receives uploads from an Ambient Weather console ("customized server"
//! mode) and republishes each reading as a Home Assistant MQTT sensor.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use chrono::{DateTime, Utc};
use config::Config;
use services::MqttService;
use std::sync::RwLock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub mqtt: MqttService,
    last_report: RwLock<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(config: Config, mqtt: MqttService) -> Self {
        Self {
            config,
            mqtt,
            last_report: RwLock::new(None),
        }
    }

    /// Mark that a station upload was just accepted.
    pub fn record_report(&self) {
        match self.last_report.write() {
            Ok(mut guard) => *guard = Some(Utc::now()),
            Err(e) => tracing::error!(error = %e, "last_report lock poisoned"),
        }
    }

    /// Time of the last accepted station upload.
    pub fn last_report(&self) -> Option<DateTime<Utc>> {
        self.last_report.read().ok().and_then(|guard| *guard)
    }
}
