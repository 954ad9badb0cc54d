// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sensor catalogue and Home Assistant discovery payloads.

use serde::Serialize;

/// Static description of one sensor exposed to Home Assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSpec {
    /// Topic segment, e.g. `temperature` in `.../temperature/state`
    pub key: &'static str,
    pub name: &'static str,
    pub unique_id: &'static str,
    pub device_class: Option<&'static str>,
    pub unit_of_measurement: &'static str,
    pub state_class: &'static str,
}

/// Device block shared by every sensor so Home Assistant groups them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeviceInfo {
    pub identifiers: &'static str,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub name: &'static str,
    pub via_device: &'static str,
}

/// The weather station device.
pub const STATION_DEVICE: DeviceInfo = DeviceInfo {
    identifiers: "ambw_mqtt",
    manufacturer: "Ambient Weather",
    model: "WS-2902",
    name: "MQTT Weather Station",
    via_device: "ambient_weather_mqtt",
};

/// Retained discovery payload published on `.../<key>/config`.
#[derive(Debug, Serialize)]
pub struct DiscoveryConfig<'a> {
    pub name: &'static str,
    pub unique_id: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<&'static str>,
    pub device: &'a DeviceInfo,
    pub state_topic: String,
    pub unit_of_measurement: &'static str,
    pub state_class: &'static str,
}

impl SensorSpec {
    /// Build the discovery payload for this sensor.
    pub fn discovery_config<'a>(
        &self,
        state_topic: String,
        device: &'a DeviceInfo,
    ) -> DiscoveryConfig<'a> {
        DiscoveryConfig {
            name: self.name,
            unique_id: self.unique_id,
            device_class: self.device_class,
            device,
            state_topic,
            unit_of_measurement: self.unit_of_measurement,
            state_class: self.state_class,
        }
    }
}

const fn sensor(
    key: &'static str,
    name: &'static str,
    unique_id: &'static str,
    device_class: Option<&'static str>,
    unit_of_measurement: &'static str,
    state_class: &'static str,
) -> SensorSpec {
    SensorSpec {
        key,
        name,
        unique_id,
        device_class,
        unit_of_measurement,
        state_class,
    }
}

const MEASUREMENT: &str = "measurement";
const TOTAL_INCREASING: &str = "total_increasing";

// unique_id values are what Home Assistant keys entities on; never rename them.
#[rustfmt::skip]
pub static SENSORS: [SensorSpec; 19] = [
    sensor("temperature", "Outside Temperature", "ambw_mqtt_outside_temp", Some("temperature"), "°F", MEASUREMENT),
    sensor("feelsLike", "Outside Feels Like", "ambw_mqtt_outside_feels", Some("temperature"), "°F", MEASUREMENT),
    sensor("humidity", "Outside Humidity", "ambw_mqtt_outside_hum", Some("humidity"), "%", MEASUREMENT),
    sensor("dewPoint", "Outside Dew Point", "ambw_mqtt_outside_dew", Some("temperature"), "°F", MEASUREMENT),
    sensor("windChill", "Wind Chill", "ambw_mqtt_wind_chill", Some("temperature"), "°F", MEASUREMENT),
    sensor("windDir", "Wind Dir", "ambw_mqtt_wind_dir", None, "°", MEASUREMENT),
    sensor("windSpeed", "Wind Speed", "ambw_mqtt_wind_speed", Some("wind_speed"), "mph", MEASUREMENT),
    sensor("windGust", "Wind Gust", "ambw_mqtt_wind_gust", Some("wind_speed"), "mph", MEASUREMENT),
    sensor("rainHourly", "Hourly Rain Rate", "ambw_mqtt_hourly_rain", Some("precipitation_intensity"), "in/h", MEASUREMENT),
    sensor("rainDaily", "Daily Rain", "ambw_mqtt_daily_rain", Some("precipitation"), "in", TOTAL_INCREASING),
    sensor("rainWeekly", "Weekly Rain", "ambw_mqtt_weekly_rain", Some("precipitation"), "in", TOTAL_INCREASING),
    sensor("rainMonthly", "Monthly Rain", "ambw_mqtt_monthyl_rain", Some("precipitation"), "in", TOTAL_INCREASING),
    sensor("rainLifetime", "Lifetime Rain", "ambw_mqtt_lifetime_rain", Some("precipitation"), "in", TOTAL_INCREASING),
    sensor("solarRadiation", "Solar Radiation", "ambw_mqtt_solar_rad", Some("irradiance"), "W/m²", MEASUREMENT),
    sensor("UV", "UV Index", "ambw_mqtt_uv", None, "Index", MEASUREMENT),
    sensor("kitchenTemperature", "Kitchen Temperature", "ambw_mqtt_indoor_temp", Some("temperature"), "°F", MEASUREMENT),
    sensor("kitchenHumidity", "Kitchen Humidity", "ambw_mqtt_indoor_hum", Some("humidity"), "%", MEASUREMENT),
    sensor("pressure", "Outside Pressure", "ambw_mqtt_abs_press", Some("atmospheric_pressure"), "hPa", MEASUREMENT),
    sensor("relativePressure", "Outside Relative Pressure", "ambw_mqtt_rel_press", Some("atmospheric_pressure"), "hPa", MEASUREMENT),
];

/// Look up a sensor by its topic key.
pub fn find(key: &str) -> Option<&'static SensorSpec> {
    SENSORS.iter().find(|s| s.key == key)
}
