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

//! Read-only projections of the aggregation state.

use crate::metrics::AccumulatorSet;
use framepulse_core::telemetry::units::duration_ms_to_frame_rate;
use framepulse_core::{MetricKind, Quantity};
use serde::Serialize;

/// Instantaneous reading and committed statistics of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricView {
    /// The metric this view describes.
    pub kind: MetricKind,
    /// Latest normalized reading, possibly the sentinel.
    pub instantaneous: f64,
    /// Mean of the last closed window.
    pub average: f64,
    /// All-time minimum since tracking started.
    pub min: f64,
    /// All-time maximum since tracking started.
    pub max: f64,
}

impl MetricView {
    /// Derives the frame-rate view of a duration metric.
    ///
    /// Duration and rate are inversely related, so the slowest frame gives
    /// the minimum rate: `min = rate(max)` and `max = rate(min)`.
    /// Returns `None` for metrics that are not durations.
    pub fn frame_rate(&self) -> Option<MetricView> {
        if self.kind.quantity() != Quantity::Duration {
            return None;
        }
        Some(MetricView {
            kind: self.kind,
            instantaneous: duration_ms_to_frame_rate(self.instantaneous),
            average: duration_ms_to_frame_rate(self.average),
            min: duration_ms_to_frame_rate(self.max),
            max: duration_ms_to_frame_rate(self.min),
        })
    }
}

/// Immutable view of the aggregator, produced fresh on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Ticks elapsed since the last window close.
    pub tick: u32,
    /// Windows closed since the engine was enabled.
    pub windows_closed: u64,
    /// One view per tracked metric, in arena order.
    pub metrics: Vec<MetricView>,
}

impl Snapshot {
    pub(crate) fn capture(tick: u32, windows_closed: u64, accumulators: &AccumulatorSet) -> Self {
        let metrics = accumulators
            .tracked()
            .map(|(kind, acc)| {
                let stats = acc.snapshot();
                MetricView {
                    kind,
                    instantaneous: acc.last_reading(),
                    average: stats.average,
                    min: stats.min,
                    max: stats.max,
                }
            })
            .collect();

        Self {
            tick,
            windows_closed,
            metrics,
        }
    }

    /// The view of `kind`, if tracked.
    pub fn metric(&self, kind: MetricKind) -> Option<&MetricView> {
        self.metrics.iter().find(|view| view.kind == kind)
    }

    /// The frame-rate view derived from the duration metric `kind`.
    pub fn frame_rate(&self, kind: MetricKind) -> Option<MetricView> {
        self.metric(kind).and_then(MetricView::frame_rate)
    }
}
