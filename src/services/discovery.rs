// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Home Assistant MQTT discovery announcements.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::sensor::{SENSORS, STATION_DEVICE};
use crate::services::mqtt::MqttService;

/// Publish a retained discovery config for every sensor.
///
/// Returns the number of configs published. Stops at the first failure.
pub async fn announce_sensors(mqtt: &MqttService, config: &Config) -> Result<usize> {
    for sensor in &SENSORS {
        let discovery = sensor.discovery_config(config.state_topic(sensor.key), &STATION_DEVICE);
        let payload = serde_json::to_string(&discovery)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON error: {}", e)))?;
        let topic = config.discovery_topic(sensor.key);

        tracing::debug!(topic = %topic, payload = %payload, "Publishing discovery config");
        mqtt.publish(&topic, &payload, true).await?;
    }

    tracing::info!(count = SENSORS.len(), "Sensor discovery configs published");
    Ok(SENSORS.len())
}
