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

//! Composite source routing each metric to its backing recorder.

use std::borrow::Cow;
use std::sync::Arc;

use framepulse_core::{MetricKind, SampleSource, SourceError};

use super::memory_source::SystemMemorySource;
use super::recorder_bank::RecorderBank;

/// The default host source: system memory from the OS, timings from host threads.
///
/// Keep a clone of [`bank`](Self::bank) on the render/main threads to publish
/// timings, and hand the `HostRecorders` itself to the aggregation engine.
#[derive(Debug, Default)]
pub struct HostRecorders {
    memory: SystemMemorySource,
    bank: Arc<RecorderBank>,
}

impl HostRecorders {
    /// Creates a host source with a fresh recorder bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host source publishing timings through an existing bank.
    pub fn with_bank(bank: Arc<RecorderBank>) -> Self {
        Self {
            memory: SystemMemorySource::new(),
            bank,
        }
    }

    /// The bank that timing producers publish into.
    pub fn bank(&self) -> &Arc<RecorderBank> {
        &self.bank
    }

    fn route(&self, kind: MetricKind) -> &dyn SampleSource {
        match kind {
            MetricKind::SystemMemory => &self.memory,
            _ => self.bank.as_ref(),
        }
    }
}

impl SampleSource for HostRecorders {
    fn source_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("host-recorders")
    }

    fn start(&self, kind: MetricKind) -> Result<(), SourceError> {
        self.route(kind).start(kind)
    }

    fn stop(&self, kind: MetricKind) -> Result<(), SourceError> {
        self.route(kind).stop(kind)
    }

    fn current_value(&self, kind: MetricKind) -> f64 {
        self.route(kind).current_value(kind)
    }
}
