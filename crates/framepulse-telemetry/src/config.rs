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

//! Aggregator configuration.

use crate::error::ConfigError;
use framepulse_core::MetricKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ticks between two accepted samples unless configured otherwise.
pub const DEFAULT_SAMPLING_INTERVAL: u32 = 10;
/// Ticks between two window closes unless configured otherwise.
pub const DEFAULT_WINDOW_SIZE: u32 = 500;

fn default_sampling_interval() -> u32 {
    DEFAULT_SAMPLING_INTERVAL
}

fn default_window_size() -> u32 {
    DEFAULT_WINDOW_SIZE
}

fn default_metrics() -> Vec<MetricKind> {
    vec![
        MetricKind::SystemMemory,
        MetricKind::FrameDelta,
        MetricKind::RenderThread,
    ]
}

/// Sampling cadence and tracked metric set of an aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Number of ticks between accepted readings.
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval: u32,
    /// Number of ticks between average commits. Must be a multiple of
    /// `sampling_interval`.
    #[serde(default = "default_window_size")]
    pub window_size: u32,
    /// Metrics to track. Duplicates are ignored.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricKind>,
}

impl AggregatorConfig {
    /// Load a configuration from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize this configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save this configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Sets the sampling interval.
    pub fn with_sampling_interval(mut self, ticks: u32) -> Self {
        self.sampling_interval = ticks;
        self
    }

    /// Sets the window size.
    pub fn with_window_size(mut self, ticks: u32) -> Self {
        self.window_size = ticks;
        self
    }

    /// Replaces the tracked metric set.
    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = MetricKind>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    /// Checks the cadence invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling_interval == 0 {
            return Err(ConfigError::ZeroSamplingInterval);
        }
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.window_size % self.sampling_interval != 0 {
            return Err(ConfigError::WindowNotMultiple {
                window_size: self.window_size,
                sampling_interval: self.sampling_interval,
            });
        }
        if self.metrics.is_empty() {
            return Err(ConfigError::NoMetrics);
        }
        Ok(())
    }

    /// Number of sampling ticks in one window.
    pub fn samples_per_window(&self) -> u32 {
        if self.sampling_interval == 0 {
            0
        } else {
            self.window_size / self.sampling_interval
        }
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sampling_interval: DEFAULT_SAMPLING_INTERVAL,
            window_size: DEFAULT_WINDOW_SIZE,
            metrics: default_metrics(),
        }
    }
}
