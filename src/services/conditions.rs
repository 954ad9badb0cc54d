// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived weather conditions (unit conversion, heat index, wind chill).
//!
//! Formulas follow the NWS definitions:
//! - Heat index: Steadman's simple form, escalating to the Rothfusz
//!   regression with its low/high humidity adjustments.
//! - Wind chill: the 2001 NWS wind chill index.

/// Inches of mercury to hectopascals.
const HPA_PER_INHG: f32 = 33.86;

/// Convert a barometer reading in inHg to hPa.
pub fn inhg_to_hpa(inhg: f32) -> f32 {
    inhg * HPA_PER_INHG
}

/// Heat index ("feels like") in °F from air temperature (°F) and relative humidity (%).
pub fn heat_index_f(temp_f: f64, rh: f64) -> f64 {
    if temp_f < 80.0 {
        return temp_f;
    }

    let steadman = 0.5 * (temp_f + 61.0 + (temp_f - 68.0) * 1.2 + rh * 0.094);
    if (temp_f + steadman) / 2.0 < 80.0 {
        return steadman;
    }

    let rothfusz = -42.379 + 2.049_015_23 * temp_f + 10.143_331_27 * rh
        - 0.224_755_41 * temp_f * rh
        - 0.006_837_83 * temp_f * temp_f
        - 0.054_817_17 * rh * rh
        + 0.001_228_74 * temp_f * temp_f * rh
        + 0.000_852_82 * temp_f * rh * rh
        - 0.000_001_99 * temp_f * temp_f * rh * rh;

    if rh < 13.0 && temp_f > 80.0 && temp_f < 112.0 {
        rothfusz - ((13.0 - rh) / 4.0) * ((17.0 - (temp_f - 95.0).abs()) / 17.0).sqrt()
    } else if rh > 85.0 && temp_f > 80.0 && temp_f < 87.0 {
        rothfusz + ((rh - 85.0) / 10.0) * ((87.0 - temp_f) / 5.0)
    } else {
        rothfusz
    }
}

/// Wind chill in °F. Undefined above 50 °F or at 3 mph and below.
pub fn wind_chill_f(temp_f: f32, wind_mph: f32) -> Option<f32> {
    if temp_f > 50.0 || wind_mph <= 3.0 {
        return None;
    }
    let v = wind_mph.powf(0.16);
    Some(35.74 + 0.6215 * temp_f - 35.75 * v + 0.4275 * temp_f * v)
}
