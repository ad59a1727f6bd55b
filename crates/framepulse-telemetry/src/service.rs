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

//! The aggregation engine: tick-driven sampling and windowed statistics.

use crate::config::AggregatorConfig;
use crate::error::ConfigError;
use crate::metrics::AccumulatorSet;
use crate::snapshot::Snapshot;
use crate::utils::RecorderSession;
use framepulse_core::telemetry::units::normalize;
use framepulse_core::{MetricKind, SampleSource, SourceError};
use std::sync::Arc;

/// State held only while the engine is enabled.
#[derive(Debug)]
struct ActiveState {
    accumulators: AccumulatorSet,
    // Dropping the session releases the host recorders.
    session: RecorderSession,
}

/// Aggregates host telemetry into running min/max and windowed averages.
///
/// The engine is driven by the host's per-frame callback. While enabled it
/// samples every `sampling_interval` ticks and commits averages every
/// `window_size` ticks. All state is dropped and all recorders released on
/// [`disable`](Self::disable) or when the engine itself is dropped.
#[derive(Debug)]
pub struct AggregationEngine {
    config: AggregatorConfig,
    active: Option<ActiveState>,
    tick_counter: u32,
    windows_closed: u64,
    total_ticks: u64,
}

impl AggregationEngine {
    /// Creates a disabled engine, rejecting invalid configurations.
    pub fn new(config: AggregatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            active: None,
            tick_counter: 0,
            windows_closed: 0,
            total_ticks: 0,
        })
    }

    /// Starts tracking, acquiring recorders from `source`.
    ///
    /// Recorders that fail to start are logged and skipped; their metrics keep
    /// reporting whatever the source returns. Enabling an enabled engine
    /// restarts it from scratch.
    pub fn enable(&mut self, source: Arc<dyn SampleSource>) {
        if self.active.is_some() {
            self.disable();
        }

        let accumulators = AccumulatorSet::with_metrics(self.config.metrics.iter().copied());
        let session = RecorderSession::open(source, accumulators.kinds());
        log::info!(
            "Aggregation enabled on {}: {} metric(s), sample every {} tick(s), window {} tick(s)",
            session.source().source_id(),
            accumulators.len(),
            self.config.sampling_interval,
            self.config.window_size
        );

        self.tick_counter = 0;
        self.windows_closed = 0;
        self.total_ticks = 0;
        self.active = Some(ActiveState {
            accumulators,
            session,
        });
    }

    /// Stops tracking, dropping all statistics and releasing every recorder.
    ///
    /// Does nothing if the engine is already disabled.
    pub fn disable(&mut self) {
        if let Some(state) = self.active.take() {
            log::info!(
                "Aggregation disabled after {} tick(s), {} window(s) closed",
                self.total_ticks,
                self.windows_closed
            );
            drop(state);
        }
        self.tick_counter = 0;
    }

    /// Whether the engine is currently tracking.
    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// Advances the engine by one host tick.
    ///
    /// `frame_delta_secs` is the host's frame delta, used when
    /// [`MetricKind::FrameDelta`] is tracked. Returns a snapshot on sampling
    /// ticks and `None` otherwise, or when the engine is disabled.
    pub fn tick(&mut self, frame_delta_secs: f64) -> Option<Snapshot> {
        let state = self.active.as_mut()?;

        self.tick_counter += 1;
        self.total_ticks += 1;
        if self.tick_counter % self.config.sampling_interval != 0 {
            return None;
        }

        let source = state.session.source();
        for kind in MetricKind::ALL {
            let Some(acc) = state.accumulators.get_mut(kind) else {
                continue;
            };
            let raw = if kind.uses_recorder() {
                source.current_value(kind)
            } else {
                frame_delta_secs
            };
            acc.offer(normalize(kind, raw));
        }
        log::trace!(
            "Sampled {} metric(s) at tick {}",
            state.accumulators.len(),
            self.tick_counter
        );

        if self.tick_counter >= self.config.window_size {
            state.accumulators.close_all();
            self.windows_closed += 1;
            self.tick_counter = 0;
            for (kind, acc) in state.accumulators.tracked() {
                log::debug!(
                    "Window {} closed: {} average = {:.2}",
                    self.windows_closed,
                    kind,
                    acc.last_committed_average()
                );
            }
        }

        Some(Snapshot::capture(
            self.tick_counter,
            self.windows_closed,
            &state.accumulators,
        ))
    }

    /// Captures the current state, or `None` while disabled.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.active.as_ref().map(|state| {
            Snapshot::capture(self.tick_counter, self.windows_closed, &state.accumulators)
        })
    }

    /// The accumulators, or `None` while disabled.
    pub fn accumulators(&self) -> Option<&AccumulatorSet> {
        self.active.as_ref().map(|state| &state.accumulators)
    }

    /// Metrics whose recorder started successfully, empty while disabled.
    pub fn started_recorders(&self) -> &[MetricKind] {
        self.active
            .as_ref()
            .map(|state| state.session.started())
            .unwrap_or(&[])
    }

    /// Metrics whose recorder failed to start on the last `enable`, with the reason.
    ///
    /// Those metrics stay tracked and keep reading whatever the source reports.
    pub fn failed_recorders(&self) -> &[(MetricKind, SourceError)] {
        self.active
            .as_ref()
            .map(|state| state.session.failed())
            .unwrap_or(&[])
    }

    /// Ticks elapsed since the last window close.
    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Windows closed since the engine was enabled.
    pub fn windows_closed(&self) -> u64 {
        self.windows_closed
    }

    /// Ticks elapsed since the engine was enabled.
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// The validated configuration.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self {
            config: AggregatorConfig::default(),
            active: None,
            tick_counter: 0,
            windows_closed: 0,
            total_ticks: 0,
        }
    }
}
