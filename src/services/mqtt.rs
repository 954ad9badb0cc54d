// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MQTT broker session.
//!
//! Wraps a `rumqttc` client. The event loop is driven by a background task
//! that logs connection drops and lets the client reconnect on its own.

use crate::config::Config;
use crate::error::{AppError, Result};
use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Packet, QoS};
use std::sync::Mutex;
use std::time::Duration;

/// Bound on in-flight requests queued between client and event loop.
const REQUEST_CHANNEL_CAPACITY: usize = 64;
/// How long startup waits for the broker's CONNACK.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause between reconnect attempts after the connection drops.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// A message handed to the broker (or captured in offline mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: String,
    pub retain: bool,
}

enum Backend {
    Broker(AsyncClient),
    /// Offline: publishes are captured instead of sent.
    Recording(Mutex<Vec<PublishedMessage>>),
}

/// MQTT publisher shared by all request handlers.
pub struct MqttService {
    backend: Backend,
}

impl MqttService {
    /// Connect to the broker and wait for it to accept the session.
    ///
    /// Fails if the broker refuses the connection or does not answer within
    /// `CONNECT_TIMEOUT`.
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut options = MqttOptions::new(
            config.mqtt_client_id.clone(),
            config.mqtt_host.clone(),
            config.mqtt_port,
        );
        options.set_keep_alive(Duration::from_secs(config.mqtt_keep_alive));
        options.set_credentials(config.mqtt_username.clone(), config.mqtt_password.clone());

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CHANNEL_CAPACITY);

        tokio::time::timeout(CONNECT_TIMEOUT, wait_for_connack(&mut eventloop))
            .await
            .map_err(|_| {
                AppError::Mqtt(format!(
                    "no CONNACK from {}:{} within {:?}",
                    config.mqtt_host, config.mqtt_port, CONNECT_TIMEOUT
                ))
            })??;

        tracing::info!(
            host = %config.mqtt_host,
            port = config.mqtt_port,
            client_id = %config.mqtt_client_id,
            "Connected to MQTT broker"
        );

        tokio::spawn(drive_event_loop(eventloop));

        Ok(Self {
            backend: Backend::Broker(client),
        })
    }

    /// Create an offline session that records publishes (for tests).
    pub fn new_recording() -> Self {
        Self {
            backend: Backend::Recording(Mutex::new(Vec::new())),
        }
    }

    /// Publish a UTF-8 payload at QoS 1.
    ///
    /// Never waits on the request queue: while the broker is unreachable the
    /// queue fills up and further publishes fail immediately.
    pub async fn publish(&self, topic: &str, payload: &str, retain: bool) -> Result<()> {
        match &self.backend {
            Backend::Broker(client) => {
                client.try_publish(topic, QoS::AtLeastOnce, retain, payload.as_bytes().to_vec())?;
            }
            Backend::Recording(messages) => {
                messages
                    .lock()
                    .map_err(|e| AppError::Mqtt(format!("recording lock poisoned: {e}")))?
                    .push(PublishedMessage {
                        topic: topic.to_string(),
                        payload: payload.to_string(),
                        retain,
                    });
            }
        }
        Ok(())
    }

    /// Messages captured by a recording session. Always empty for a live session.
    pub fn published(&self) -> Vec<PublishedMessage> {
        match &self.backend {
            Backend::Broker(_) => Vec::new(),
            Backend::Recording(messages) => messages
                .lock()
                .map(|guard| guard.clone())
                .unwrap_or_default(),
        }
    }

    /// Send DISCONNECT so the broker drops the session cleanly.
    pub async fn disconnect(&self) -> Result<()> {
        if let Backend::Broker(client) = &self.backend {
            client.try_disconnect()?;
            tracing::info!("Disconnected from MQTT broker");
        }
        Ok(())
    }
}

async fn wait_for_connack(eventloop: &mut EventLoop) -> std::result::Result<(), ConnectionError> {
    loop {
        if let Event::Incoming(Packet::ConnAck(ack)) = eventloop.poll().await? {
            tracing::debug!(session_present = ack.session_present, "CONNACK received");
            return Ok(());
        }
    }
}

/// Poll forever. `rumqttc` reconnects on the poll after an error.
async fn drive_event_loop(mut eventloop: EventLoop) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                tracing::info!("Reconnected to MQTT broker");
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                tracing::warn!("Broker sent DISCONNECT");
            }
            Ok(_) => {}
            Err(ConnectionError::RequestsDone) => {
                tracing::debug!("MQTT client dropped, stopping event loop");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "MQTT connection lost, retrying");
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}
