// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Normalization of raw recorder units into reporting units.
//!
//! None of these functions fail. Host instrumentation is allowed to glitch on
//! any tick, so every implausible input collapses to [`SENTINEL`] and is then
//! filtered out by the accumulators.

use super::metrics::{MetricKind, RawUnit};

/// Reserved value meaning "no valid reading this tick".
pub const SENTINEL: f64 = -1.0;

/// Returns `true` if `value` is a usable reading: finite and strictly positive.
#[inline]
pub fn is_valid(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Converts nanoseconds to milliseconds.
///
/// Results below one millisecond are treated as outliers: recorders
/// occasionally emit near-zero bursts that would drag averages down.
pub fn nanos_to_millis(ns: f64) -> f64 {
    let ms = ns / 1_000_000.0;
    if !ms.is_finite() || ms < 1.0 {
        SENTINEL
    } else {
        ms
    }
}

/// Converts a main-thread decisecond reading into the alternate frame rate.
///
/// The result is in frames per second, not milliseconds.
pub fn deciseconds_to_millis(ds: f64) -> f64 {
    let rate = 1000.0 / (ds / 100.0);
    if is_valid(rate) {
        rate
    } else {
        SENTINEL
    }
}

/// Converts kibibytes to megabytes.
pub fn kibibytes_to_megabytes(kib: f64) -> f64 {
    if kib.is_finite() && kib >= 0.0 {
        kib / 1024.0
    } else {
        SENTINEL
    }
}

/// Converts a host frame delta from seconds to milliseconds.
pub fn seconds_to_millis(secs: f64) -> f64 {
    if secs.is_finite() && secs >= 0.0 {
        secs * 1000.0
    } else {
        SENTINEL
    }
}

/// Converts a frame duration in milliseconds into frames per second.
///
/// Any non-positive result is normalized to exactly [`SENTINEL`]. This covers a
/// zero or negative duration as well as the sentinel itself (`1000 / -1`).
pub fn duration_ms_to_frame_rate(ms: f64) -> f64 {
    let rate = 1000.0 / ms;
    if is_valid(rate) {
        rate
    } else {
        SENTINEL
    }
}

/// Normalizes a raw reading of `kind` into its reporting unit.
pub fn normalize(kind: MetricKind, raw: f64) -> f64 {
    match kind.raw_unit() {
        RawUnit::Nanoseconds => nanos_to_millis(raw),
        RawUnit::Deciseconds => deciseconds_to_millis(raw),
        RawUnit::Seconds => seconds_to_millis(raw),
        RawUnit::Kibibytes => kibibytes_to_megabytes(raw),
    }
}
