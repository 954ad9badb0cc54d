// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod bridge;
pub mod conditions;
pub mod discovery;
pub mod mqtt;

pub use bridge::{forward_report, ForwardSummary};
pub use discovery::announce_sensors;
pub use mqtt::{MqttService, PublishedMessage};
