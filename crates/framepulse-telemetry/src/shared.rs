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

//! A thread-safe handle for hosts that invoke callbacks from several threads.

use crate::config::AggregatorConfig;
use crate::error::{TelemetryError, TelemetryResult};
use crate::service::AggregationEngine;
use crate::snapshot::Snapshot;
use framepulse_core::SampleSource;
use std::sync::{Arc, Mutex, MutexGuard};

/// An [`AggregationEngine`] behind a single mutex.
///
/// Accumulator updates are read-modify-write sequences, so every call is
/// serialized through the same lock. Clones share the same engine.
#[derive(Debug, Clone)]
pub struct SharedAggregator {
    engine: Arc<Mutex<AggregationEngine>>,
}

impl SharedAggregator {
    /// Creates a shared, disabled engine.
    pub fn new(config: AggregatorConfig) -> TelemetryResult<Self> {
        let engine = AggregationEngine::new(config)?;
        Ok(Self::from_engine(engine))
    }

    /// Wraps an existing engine.
    pub fn from_engine(engine: AggregationEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> TelemetryResult<MutexGuard<'_, AggregationEngine>> {
        self.engine.lock().map_err(|_| TelemetryError::Poisoned)
    }

    /// See [`AggregationEngine::enable`].
    pub fn enable(&self, source: Arc<dyn SampleSource>) -> TelemetryResult<()> {
        self.lock()?.enable(source);
        Ok(())
    }

    /// See [`AggregationEngine::disable`].
    pub fn disable(&self) -> TelemetryResult<()> {
        self.lock()?.disable();
        Ok(())
    }

    /// See [`AggregationEngine::tick`].
    pub fn tick(&self, frame_delta_secs: f64) -> TelemetryResult<Option<Snapshot>> {
        Ok(self.lock()?.tick(frame_delta_secs))
    }

    /// See [`AggregationEngine::snapshot`].
    pub fn snapshot(&self) -> TelemetryResult<Option<Snapshot>> {
        Ok(self.lock()?.snapshot())
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with_engine<R>(
        &self,
        f: impl FnOnce(&mut AggregationEngine) -> R,
    ) -> TelemetryResult<R> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}
