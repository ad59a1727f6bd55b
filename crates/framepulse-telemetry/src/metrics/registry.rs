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

//! Arena of accumulators indexed by [`MetricKind`].

use super::accumulator::MetricAccumulator;
use framepulse_core::MetricKind;

/// One optional accumulator slot per [`MetricKind`].
///
/// Lookups are a single array index; iteration follows [`MetricKind::ALL`].
#[derive(Debug, Clone, Default)]
pub struct AccumulatorSet {
    slots: [Option<MetricAccumulator>; MetricKind::COUNT],
}

impl AccumulatorSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set tracking every metric in `kinds`. Duplicates collapse.
    pub fn with_metrics(kinds: impl IntoIterator<Item = MetricKind>) -> Self {
        let mut set = Self::new();
        for kind in kinds {
            set.track(kind);
        }
        set
    }

    /// Starts tracking `kind`. Returns `false` if it was already tracked.
    pub fn track(&mut self, kind: MetricKind) -> bool {
        let slot = &mut self.slots[kind.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(MetricAccumulator::new());
        true
    }

    /// Whether `kind` is tracked.
    pub fn contains(&self, kind: MetricKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// The accumulator for `kind`, if tracked.
    pub fn get(&self, kind: MetricKind) -> Option<&MetricAccumulator> {
        self.slots[kind.index()].as_ref()
    }

    /// Mutable access to the accumulator for `kind`, if tracked.
    pub fn get_mut(&mut self, kind: MetricKind) -> Option<&mut MetricAccumulator> {
        self.slots[kind.index()].as_mut()
    }

    /// Tracked metrics with their accumulators, in arena order.
    pub fn tracked(&self) -> impl Iterator<Item = (MetricKind, &MetricAccumulator)> {
        MetricKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|acc| (kind, acc)))
    }

    /// Tracked metric kinds, in arena order.
    pub fn kinds(&self) -> impl Iterator<Item = MetricKind> + '_ {
        self.tracked().map(|(kind, _)| kind)
    }

    /// Closes the window of every tracked accumulator.
    pub fn close_all(&mut self) {
        for acc in self.slots.iter_mut().flatten() {
            acc.close_window();
        }
    }

    /// Number of tracked metrics.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no metric is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
