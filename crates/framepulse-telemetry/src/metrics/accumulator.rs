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

//! Running statistics for a single tracked metric.

use framepulse_core::telemetry::units::{is_valid, SENTINEL};
use serde::Serialize;

/// Read-only view of an accumulator's committed statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccumulatorStats {
    /// Mean of the most recently closed window, or [`SENTINEL`] if none closed yet.
    pub average: f64,
    /// Smallest valid sample since tracking started, or [`SENTINEL`].
    pub min: f64,
    /// Largest valid sample since tracking started, or [`SENTINEL`].
    pub max: f64,
}

/// Per-metric running state: a windowed sum/count pair plus all-time extrema.
///
/// `min`/`max` mean "since tracking started" while the average only covers the
/// last closed window. [`close_window`](Self::close_window) resets the sum and
/// count, never the extrema.
#[derive(Debug, Clone)]
pub struct MetricAccumulator {
    sum: f64,
    sample_count: u32,
    running_min: f64,
    running_max: f64,
    last_committed_average: f64,
    last_reading: f64,
}

impl MetricAccumulator {
    /// Creates an accumulator with empty window and sentinel bounds.
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            sample_count: 0,
            running_min: f64::INFINITY,
            running_max: f64::NEG_INFINITY,
            last_committed_average: SENTINEL,
            last_reading: SENTINEL,
        }
    }

    /// Offers one sampling-tick reading.
    ///
    /// The reading is always kept as the instantaneous value. It only enters
    /// the window and the extrema if it is finite and strictly positive.
    pub fn offer(&mut self, value: f64) {
        self.last_reading = value;
        if !is_valid(value) {
            return;
        }
        self.sum += value;
        self.sample_count += 1;
        self.running_min = self.running_min.min(value);
        self.running_max = self.running_max.max(value);
    }

    /// Commits the current window's mean and starts a new window.
    ///
    /// A window without valid samples carries the previous average forward.
    pub fn close_window(&mut self) -> f64 {
        if self.sample_count == 0 {
            return self.last_committed_average;
        }
        self.last_committed_average = self.sum / f64::from(self.sample_count);
        self.sum = 0.0;
        self.sample_count = 0;
        self.last_committed_average
    }

    /// Returns the committed average and all-time extrema.
    pub fn snapshot(&self) -> AccumulatorStats {
        let has_bounds = self.running_min <= self.running_max;
        AccumulatorStats {
            average: self.last_committed_average,
            min: if has_bounds { self.running_min } else { SENTINEL },
            max: if has_bounds { self.running_max } else { SENTINEL },
        }
    }

    /// Sum of the valid samples in the open window.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Number of valid samples in the open window.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Raw lower bound, `+inf` until a valid sample is accepted.
    pub fn running_min(&self) -> f64 {
        self.running_min
    }

    /// Raw upper bound, `-inf` until a valid sample is accepted.
    pub fn running_max(&self) -> f64 {
        self.running_max
    }

    /// The most recent reading offered, valid or not.
    pub fn last_reading(&self) -> f64 {
        self.last_reading
    }

    /// Mean of the last closed window, or [`SENTINEL`].
    pub fn last_committed_average(&self) -> f64 {
        self.last_committed_average
    }
}

impl Default for MetricAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_accumulator_reports_sentinels() {
        let acc = MetricAccumulator::new();
        let stats = acc.snapshot();
        assert_eq!(stats.average, SENTINEL);
        assert_eq!(stats.min, SENTINEL);
        assert_eq!(stats.max, SENTINEL);
        assert_eq!(acc.sample_count(), 0);
        assert_eq!(acc.sum(), 0.0);
        assert_eq!(acc.last_reading(), SENTINEL);
    }

    #[test]
    fn test_mixed_window_scenario() {
        let mut acc = MetricAccumulator::new();
        for value in [16.0, 20.0, -1.0, 18.0] {
            acc.offer(value);
        }

        assert_relative_eq!(acc.close_window(), 18.0);
        assert_eq!(acc.sample_count(), 0);
        assert_eq!(acc.sum(), 0.0);
        assert_eq!(acc.running_max(), 20.0);
        assert_eq!(acc.running_min(), 16.0);
    }

    #[test]
    fn test_empty_window_keeps_previous_average() {
        let mut acc = MetricAccumulator::new();
        acc.offer(10.0);
        acc.offer(30.0);
        assert_relative_eq!(acc.close_window(), 20.0);

        acc.offer(-1.0);
        acc.offer(0.0);
        assert_relative_eq!(acc.close_window(), 20.0);
        assert_relative_eq!(acc.snapshot().average, 20.0);
    }

    #[test]
    fn test_empty_window_before_any_sample_stays_sentinel() {
        let mut acc = MetricAccumulator::new();
        assert_eq!(acc.close_window(), SENTINEL);
    }

    #[test]
    fn test_invalid_values_leave_state_untouched() {
        let mut acc = MetricAccumulator::new();
        acc.offer(12.0);

        for value in [0.0, -0.5, SENTINEL, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            acc.offer(value);
            assert_eq!(acc.sample_count(), 1);
            assert_eq!(acc.sum(), 12.0);
            assert_eq!(acc.running_min(), 12.0);
            assert_eq!(acc.running_max(), 12.0);
        }
    }

    #[test]
    fn test_invalid_value_is_still_the_instantaneous_reading() {
        let mut acc = MetricAccumulator::new();
        acc.offer(12.0);
        acc.offer(SENTINEL);
        assert_eq!(acc.last_reading(), SENTINEL);
    }

    #[test]
    fn test_extrema_survive_window_close() {
        let mut acc = MetricAccumulator::new();
        let windows: [&[f64]; 3] = [&[15.0, 17.0], &[16.0], &[14.0, 25.0]];

        let mut previous_min = f64::INFINITY;
        let mut previous_max = f64::NEG_INFINITY;
        for window in windows {
            for &value in window {
                acc.offer(value);
            }
            acc.close_window();
            assert!(acc.running_min() <= previous_min);
            assert!(acc.running_max() >= previous_max);
            previous_min = acc.running_min();
            previous_max = acc.running_max();
        }

        let stats = acc.snapshot();
        assert_eq!(stats.min, 14.0);
        assert_eq!(stats.max, 25.0);
        assert_relative_eq!(stats.average, 19.5);
    }
}
