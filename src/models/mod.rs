// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod report;
pub mod sensor;

pub use report::{Reading, ReadingOutcome, WeatherReport};
pub use sensor::{DeviceInfo, DiscoveryConfig, SensorSpec};
