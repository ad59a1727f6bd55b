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

//! Defines the error types of the aggregation service.

use std::fmt;

/// A specialized `Result` type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// An invalid aggregator configuration, rejected at engine construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `sampling_interval` was zero.
    ZeroSamplingInterval,
    /// `window_size` was zero.
    ZeroWindowSize,
    /// `window_size` is not a multiple of `sampling_interval`, so the number
    /// of samples per window would be ill-defined.
    WindowNotMultiple {
        /// The configured window size, in ticks.
        window_size: u32,
        /// The configured sampling interval, in ticks.
        sampling_interval: u32,
    },
    /// The configuration tracks no metric at all.
    NoMetrics,
    /// The configuration text could not be parsed.
    Parse(String),
    /// The configuration file could not be read or written.
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSamplingInterval => write!(f, "Sampling interval must be positive"),
            ConfigError::ZeroWindowSize => write!(f, "Window size must be positive"),
            ConfigError::WindowNotMultiple {
                window_size,
                sampling_interval,
            } => write!(
                f,
                "Window size {} is not a multiple of sampling interval {}",
                window_size, sampling_interval
            ),
            ConfigError::NoMetrics => write!(f, "At least one metric must be tracked"),
            ConfigError::Parse(msg) => write!(f, "Failed to parse configuration: {msg}"),
            ConfigError::Io(msg) => write!(f, "Configuration I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

/// Top-level error of the telemetry service.
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryError {
    /// The aggregator configuration is invalid.
    Config(ConfigError),
    /// A thread panicked while holding the shared engine lock.
    Poisoned,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Config(err) => write!(f, "Configuration error: {err}"),
            TelemetryError::Poisoned => write!(f, "Shared aggregator lock was poisoned"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Config(err) => Some(err),
            TelemetryError::Poisoned => None,
        }
    }
}

impl From<ConfigError> for TelemetryError {
    fn from(err: ConfigError) -> Self {
        TelemetryError::Config(err)
    }
}
