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

//! Identifiers for the fixed set of tracked metrics.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// One of the metrics the aggregator knows how to track.
///
/// The set is closed: each variant doubles as a slot index into the
/// aggregator's accumulator arena (see [`MetricKind::index`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Memory used by the whole process, reported by the host in kibibytes.
    SystemMemory,
    /// Time spent on the render thread for one frame, reported in nanoseconds.
    RenderThread,
    /// Main thread timing, reported in deciseconds. Feeds an alternate frame rate.
    MainThread,
    /// Time between two host frames, supplied directly by the host loop in seconds.
    FrameDelta,
}

impl MetricKind {
    /// The number of variants, i.e. the size of an accumulator arena.
    pub const COUNT: usize = 4;

    /// Every variant, in arena order.
    pub const ALL: [MetricKind; Self::COUNT] = [
        MetricKind::SystemMemory,
        MetricKind::RenderThread,
        MetricKind::MainThread,
        MetricKind::FrameDelta,
    ];

    /// Returns the arena slot for this metric.
    pub fn index(self) -> usize {
        match self {
            MetricKind::SystemMemory => 0,
            MetricKind::RenderThread => 1,
            MetricKind::MainThread => 2,
            MetricKind::FrameDelta => 3,
        }
    }

    /// The unit the host reports raw readings in.
    pub fn raw_unit(self) -> RawUnit {
        match self {
            MetricKind::SystemMemory => RawUnit::Kibibytes,
            MetricKind::RenderThread => RawUnit::Nanoseconds,
            MetricKind::MainThread => RawUnit::Deciseconds,
            MetricKind::FrameDelta => RawUnit::Seconds,
        }
    }

    /// The quantity a normalized reading of this metric represents.
    pub fn quantity(self) -> Quantity {
        match self {
            MetricKind::SystemMemory => Quantity::Memory,
            MetricKind::RenderThread | MetricKind::FrameDelta => Quantity::Duration,
            MetricKind::MainThread => Quantity::Rate,
        }
    }

    /// Whether readings come from a host recorder that must be started and stopped.
    ///
    /// `FrameDelta` is handed to the aggregator on every tick instead.
    pub fn uses_recorder(self) -> bool {
        !matches!(self, MetricKind::FrameDelta)
    }

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::SystemMemory => "System Memory",
            MetricKind::RenderThread => "Render Thread",
            MetricKind::MainThread => "Main Thread",
            MetricKind::FrameDelta => "Combined Threads",
        }
    }
}

impl Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The native unit of a raw host reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawUnit {
    /// 1/1_000_000_000 of a second.
    Nanoseconds,
    /// 1/10 of a second.
    Deciseconds,
    /// Whole seconds (fractional values allowed).
    Seconds,
    /// 1024 bytes.
    Kibibytes,
}

/// What a normalized value measures, which also decides its reporting unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Milliseconds.
    Duration,
    /// Frames per second.
    Rate,
    /// Megabytes.
    Memory,
}

impl Quantity {
    /// The unit suffix used when printing a value of this quantity.
    pub fn unit_suffix(self) -> &'static str {
        match self {
            Quantity::Duration => "ms",
            Quantity::Rate => "fps",
            Quantity::Memory => "MB",
        }
    }
}
