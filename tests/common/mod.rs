// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use ambient_mqtt_bridge::config::Config;
use ambient_mqtt_bridge::routes::create_router;
use ambient_mqtt_bridge::services::MqttService;
use ambient_mqtt_bridge::AppState;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Create a test app whose MQTT session records publishes instead of sending them.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::test_default(),
        MqttService::new_recording(),
    ));
    (create_router(state.clone()), state)
}

/// Query string a WS-2902 console sends, with the test station login.
#[allow(dead_code)]
pub const SAMPLE_UPLOAD: &str = "ID=local&PASSWORD=key&tempf=84.2&humidity=70&dewptf=73.4\
&windchillf=84.2&winddir=180&windspeedmph=4.47&windgustmph=8.05&rainin=0.000\
&dailyrainin=0.020&weeklyrainin=0.340&monthlyrainin=1.100&totalrainin=38.520\
&solarradiation=512.33&UV=5&indoortempf=72.1&indoorhumidity=45\
&absbaromin=29.612&baromin=29.921";

/// Like `create_test_app`, but with caller-supplied config.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, MqttService::new_recording()));
    (create_router(state.clone()), state)
}

/// In-memory log sink for asserting on what the JSON formatter writes.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl LogCapture {
    /// JSON subscriber matching production output, at debug level.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(self.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
