// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local runs.

use std::env;
use std::str::FromStr;

/// Default Home Assistant discovery prefix.
pub const DEFAULT_DISCOVERY_PREFIX: &str = "homeassistant";
/// Default node id used in every sensor topic.
pub const DEFAULT_NODE_ID: &str = "ambientWeather";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- MQTT broker ---
    /// Broker host name or IP
    pub mqtt_host: String,
    /// Broker TCP port
    pub mqtt_port: u16,
    /// MQTT client identifier
    pub mqtt_client_id: String,
    /// Broker username
    pub mqtt_username: String,
    /// Broker password
    pub mqtt_password: String,
    /// Keep-alive interval in seconds
    pub mqtt_keep_alive: u64,

    // --- HTTP listener ---
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Server port
    pub port: u16,

    // --- Station credentials (sent as ID / PASSWORD query params) ---
    pub station_id: String,
    pub station_password: String,

    // --- Home Assistant topics ---
    pub discovery_prefix: String,
    pub node_id: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            mqtt_host: "localhost".to_string(),
            mqtt_port: 1883,
            mqtt_client_id: "ambient_weather_mqtt".to_string(),
            mqtt_username: "test_user".to_string(),
            mqtt_password: "test_password".to_string(),
            mqtt_keep_alive: 60,
            bind_address: "127.0.0.1".to_string(),
            port: 8090,
            station_id: "local".to_string(),
            station_password: "key".to_string(),
            discovery_prefix: DEFAULT_DISCOVERY_PREFIX.to_string(),
            node_id: DEFAULT_NODE_ID.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            mqtt_host: required("MQTT_HOST")?,
            mqtt_port: parsed_or("MQTT_PORT", 1883)?,
            mqtt_client_id: env::var("MQTT_CLIENT_ID")
                .unwrap_or_else(|_| "ambient_weather_mqtt".to_string()),
            mqtt_username: required("MQTT_USERNAME")?,
            mqtt_password: required("MQTT_PASSWORD")?.trim().to_string(),
            mqtt_keep_alive: parsed_or("MQTT_KEEP_ALIVE_SECS", 60)?,

            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed_or("PORT", 8090)?,

            station_id: env::var("STATION_ID").unwrap_or_else(|_| "local".to_string()),
            station_password: env::var("STATION_PASSWORD")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| "key".to_string()),

            discovery_prefix: env::var("DISCOVERY_PREFIX")
                .unwrap_or_else(|_| DEFAULT_DISCOVERY_PREFIX.to_string()),
            node_id: env::var("NODE_ID").unwrap_or_else(|_| DEFAULT_NODE_ID.to_string()),
        })
    }

    /// Config for tests, with a predictable station login.
    pub fn test_default() -> Self {
        Self::default()
    }

    /// `host:port` string for the HTTP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Topic a sensor's current value is published on.
    pub fn state_topic(&self, key: &str) -> String {
        format!(
            "{}/sensor/{}/{}/state",
            self.discovery_prefix, self.node_id, key
        )
    }

    /// Topic a sensor's Home Assistant discovery config is published on.
    pub fn discovery_topic(&self, key: &str) -> String {
        format!(
            "{}/sensor/{}/{}/config",
            self.discovery_prefix, self.node_id, key
        )
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so everything touching them lives in one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("MQTT_HOST", "broker.lan");
        env::set_var("MQTT_USERNAME", "weather");
        env::set_var("MQTT_PASSWORD", " s3cret \n");
        env::remove_var("MQTT_PORT");
        env::remove_var("STATION_ID");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.mqtt_host, "broker.lan");
        assert_eq!(config.mqtt_password, "s3cret");
        assert_eq!(config.mqtt_port, 1883);
        assert_eq!(config.station_id, "local");

        env::set_var("MQTT_PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MQTT_PORT", .. }));
        env::remove_var("MQTT_PORT");

        env::remove_var("MQTT_HOST");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("MQTT_HOST")));
    }

    #[test]
    fn test_topics() {
        let config = Config::test_default();
        assert_eq!(
            config.state_topic("temperature"),
            "homeassistant/sensor/ambientWeather/temperature/state"
        );
        assert_eq!(
            config.discovery_topic("UV"),
            "homeassistant/sensor/ambientWeather/UV/config"
        );
        assert_eq!(config.listen_addr(), "127.0.0.1:8090");
    }
}
