// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Forwards station reports to sensor state topics.

use crate::config::Config;
use crate::models::report::{Reading, ReadingOutcome, WeatherReport};
use crate::services::conditions;
use crate::services::mqtt::MqttService;

/// Per-report tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardSummary {
    /// States handed to the broker
    pub published: u32,
    /// Mapped parameters absent from the report
    pub missing: u32,
    /// Mapped parameters that failed to parse
    pub invalid: u32,
    /// Publishes the broker client rejected
    pub failed: u32,
}

/// Publish every reading in `report`.
///
/// Bad or absent parameters are logged and skipped; they never stop the
/// remaining sensors from updating.
pub async fn forward_report(
    mqtt: &MqttService,
    config: &Config,
    report: &WeatherReport,
) -> ForwardSummary {
    let mut summary = ForwardSummary::default();

    for outcome in report.readings() {
        match outcome {
            ReadingOutcome::Ready(reading) => {
                publish_reading(mqtt, config, &reading, &mut summary).await;
            }
            ReadingOutcome::Missing { param } => {
                tracing::error!(key = param, "missing value in params");
                summary.missing += 1;
            }
            ReadingOutcome::Invalid {
                param,
                value,
                reason,
            } => {
                tracing::error!(
                    error = %reason,
                    val = %value,
                    key = param,
                    "unable to parse param"
                );
                summary.invalid += 1;
            }
        }
    }

    for reading in report.derived_readings() {
        publish_reading(mqtt, config, &reading, &mut summary).await;
    }

    check_wind_chill(report);

    tracing::info!(
        published = summary.published,
        missing = summary.missing,
        invalid = summary.invalid,
        failed = summary.failed,
        "Weather report forwarded"
    );

    summary
}

async fn publish_reading(
    mqtt: &MqttService,
    config: &Config,
    reading: &Reading,
    summary: &mut ForwardSummary,
) {
    let topic = config.state_topic(reading.sensor);
    tracing::debug!(topic = reading.sensor, payload = %reading.payload, "publishing");

    match mqtt.publish(&topic, &reading.payload, false).await {
        Ok(()) => summary.published += 1,
        Err(e) => {
            tracing::error!(error = %e, topic = %topic, "Failed to publish state");
            summary.failed += 1;
        }
    }
}

/// Compare the station's wind chill with our own calculation.
///
/// Returns the computed value when a comparison was logged.
fn check_wind_chill(report: &WeatherReport) -> Option<f32> {
    let (Some(temp_f), Some(wind_mph), Some(reported)) = (
        report.parse::<f32>("tempf"),
        report.parse::<f32>("windspeedmph"),
        report.get("windchillf"),
    ) else {
        return None;
    };

    let computed = conditions::wind_chill_f(temp_f, wind_mph)?;
    tracing::debug!(
        computed_wind_chill = format!("{computed:.1}"),
        reported_wind_chill = reported,
        "wind chill check"
    );
    Some(computed)
}
