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

//! Provides an RAII guard pairing recorder `start` and `stop` calls.

use framepulse_core::{MetricKind, SampleSource, SourceError};
use std::sync::Arc;

/// Holds the host recorders of a set of metrics open for as long as it lives.
///
/// Every metric `start` was called for is stopped when the session is dropped,
/// including metrics whose `start` failed, since a backend may have acquired
/// part of its resources before failing. This also covers early returns and
/// unwinding. Failures on either side are logged and never interrupt the
/// remaining metrics.
#[derive(Debug)]
pub struct RecorderSession {
    source: Arc<dyn SampleSource>,
    // Every kind `start` was called for, in call order.
    attempted: Vec<MetricKind>,
    started: Vec<MetricKind>,
    failed: Vec<(MetricKind, SourceError)>,
}

impl RecorderSession {
    /// Starts the recorder of every recorder-backed metric in `kinds`.
    pub fn open(
        source: Arc<dyn SampleSource>,
        kinds: impl IntoIterator<Item = MetricKind>,
    ) -> Self {
        let mut attempted = Vec::new();
        let mut started = Vec::new();
        let mut failed = Vec::new();

        for kind in kinds.into_iter().filter(|kind| kind.uses_recorder()) {
            if attempted.contains(&kind) {
                continue;
            }
            attempted.push(kind);
            match source.start(kind) {
                Ok(()) => {
                    log::debug!("[RecorderSession] Started {} on {}", kind, source.source_id());
                    started.push(kind);
                }
                Err(e) => {
                    log::warn!(
                        "[RecorderSession] Failed to start {} on {}: {}",
                        kind,
                        source.source_id(),
                        e
                    );
                    failed.push((kind, e));
                }
            }
        }

        Self {
            source,
            attempted,
            started,
            failed,
        }
    }

    /// Metrics whose `start` succeeded.
    pub fn started(&self) -> &[MetricKind] {
        &self.started
    }

    /// Metrics whose recorder could not be started, with the reason.
    pub fn failed(&self) -> &[(MetricKind, SourceError)] {
        &self.failed
    }

    /// Metrics `start` was called for, in call order. All of them are stopped on drop.
    pub fn attempted(&self) -> &[MetricKind] {
        &self.attempted
    }

    /// The source this session reads from.
    pub fn source(&self) -> &Arc<dyn SampleSource> {
        &self.source
    }
}

/// Stops every attempted recorder, in reverse start order.
impl Drop for RecorderSession {
    fn drop(&mut self) {
        self.started.clear();
        for kind in self.attempted.drain(..).rev() {
            if let Err(e) = self.source.stop(kind) {
                log::warn!(
                    "[RecorderSession] Failed to stop {} on {}: {}",
                    kind,
                    self.source.source_id(),
                    e
                );
            }
        }
    }
}
