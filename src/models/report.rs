// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Station report parsing.
//!
//! Ambient Weather consoles in "customized server" mode send one GET per
//! interval with every reading as a query parameter, e.g.
//! `?ID=local&PASSWORD=key&tempf=71.6&humidity=48&baromin=29.92`.

use crate::services::conditions;
use std::collections::{BTreeMap, HashMap};

/// How a station parameter becomes a sensor state payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `f32` with a fixed number of decimal places
    Decimal(usize),
    /// `i32`
    Integer,
    /// `f32` inHg converted to hPa, one decimal place
    InHgToHpa,
}

/// Binds a station query parameter to the sensor it feeds.
#[derive(Debug, Clone, Copy)]
pub struct ParamMapping {
    pub param: &'static str,
    pub sensor: &'static str,
    pub format: Format,
}

const fn map(param: &'static str, sensor: &'static str, format: Format) -> ParamMapping {
    ParamMapping {
        param,
        sensor,
        format,
    }
}

/// Station parameters in publish order.
pub static PARAM_MAPPINGS: [ParamMapping; 18] = [
    map("tempf", "temperature", Format::Decimal(1)),
    map("humidity", "humidity", Format::Integer),
    map("dewptf", "dewPoint", Format::Decimal(1)),
    map("windchillf", "windChill", Format::Decimal(1)),
    map("winddir", "windDir", Format::Integer),
    map("windspeedmph", "windSpeed", Format::Decimal(2)),
    map("windgustmph", "windGust", Format::Decimal(2)),
    map("rainin", "rainHourly", Format::Decimal(3)),
    map("dailyrainin", "rainDaily", Format::Decimal(3)),
    map("weeklyrainin", "rainWeekly", Format::Decimal(3)),
    map("monthlyrainin", "rainMonthly", Format::Decimal(3)),
    map("totalrainin", "rainLifetime", Format::Decimal(3)),
    map("solarradiation", "solarRadiation", Format::Decimal(1)),
    map("UV", "UV", Format::Integer),
    map("indoortempf", "kitchenTemperature", Format::Decimal(1)),
    map("indoorhumidity", "kitchenHumidity", Format::Integer),
    map("absbaromin", "pressure", Format::InHgToHpa),
    map("baromin", "relativePressure", Format::InHgToHpa),
];

/// A sensor value ready to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// Sensor topic key
    pub sensor: &'static str,
    pub payload: String,
}

/// Result of converting one mapped parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingOutcome {
    Ready(Reading),
    Missing {
        param: &'static str,
    },
    Invalid {
        param: &'static str,
        value: String,
        reason: String,
    },
}

impl Format {
    /// Convert a raw parameter value into a payload string.
    pub fn render(self, raw: &str) -> Result<String, String> {
        match self {
            Format::Decimal(precision) => raw
                .parse::<f32>()
                .map(|v| format!("{v:.precision$}"))
                .map_err(|e| e.to_string()),
            Format::Integer => raw
                .parse::<i32>()
                .map(|v| v.to_string())
                .map_err(|e| e.to_string()),
            Format::InHgToHpa => raw
                .parse::<f32>()
                .map(|inhg| format!("{:.1}", conditions::inhg_to_hpa(inhg)))
                .map_err(|e| e.to_string()),
        }
    }
}

/// One station upload.
#[derive(Debug, Clone, Default)]
pub struct WeatherReport {
    params: HashMap<String, String>,
}

impl WeatherReport {
    pub fn from_params(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Raw parameter value.
    pub fn get(&self, param: &str) -> Option<&str> {
        self.params.get(param).map(String::as_str)
    }

    /// Station `ID` and `PASSWORD`, as sent.
    pub fn credentials(&self) -> (Option<&str>, Option<&str>) {
        (self.get("ID"), self.get("PASSWORD"))
    }

    /// Convert every mapped parameter, in mapping order.
    pub fn readings(&self) -> Vec<ReadingOutcome> {
        PARAM_MAPPINGS
            .iter()
            .map(|m| match self.get(m.param) {
                None => ReadingOutcome::Missing { param: m.param },
                Some(raw) => match m.format.render(raw) {
                    Ok(payload) => ReadingOutcome::Ready(Reading {
                        sensor: m.sensor,
                        payload,
                    }),
                    Err(reason) => ReadingOutcome::Invalid {
                        param: m.param,
                        value: raw.to_string(),
                        reason,
                    },
                },
            })
            .collect()
    }

    /// Readings computed from several parameters (currently the heat index).
    pub fn derived_readings(&self) -> Vec<Reading> {
        let mut readings = Vec::new();

        let temp_f = self.parse::<f64>("tempf");
        let rh = self.parse::<f64>("humidity");
        if let (Some(temp_f), Some(rh)) = (temp_f, rh) {
            readings.push(Reading {
                sensor: "feelsLike",
                payload: format!("{:.1}", conditions::heat_index_f(temp_f, rh)),
            });
        }

        readings
    }

    /// Parse a parameter, treating absent and malformed values alike.
    pub fn parse<T: std::str::FromStr>(&self, param: &str) -> Option<T> {
        self.get(param).and_then(|v| v.parse().ok())
    }

    /// Parameters safe to write to logs: everything except the station password.
    pub fn loggable_params(&self) -> BTreeMap<&str, &str> {
        self.params
            .iter()
            .filter(|(k, _)| k.as_str() != "PASSWORD")
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}
