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

//! Lock-free slots that host threads publish raw readings into.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use framepulse_core::{MetricKind, SampleSource, SourceError};

#[derive(Debug, Default)]
struct Slot {
    // f64 bits
    value: AtomicU64,
    active: AtomicBool,
}

/// One atomic "last value" slot per metric.
///
/// Producers (render thread, main thread profiler hooks) call
/// [`publish`](Self::publish) with raw readings in the metric's native unit;
/// the aggregator reads them through [`SampleSource`]. Readings published
/// while a slot is stopped are discarded.
#[derive(Debug, Default)]
pub struct RecorderBank {
    slots: [Slot; MetricKind::COUNT],
}

impl RecorderBank {
    /// Creates a bank with every slot stopped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the latest raw reading for `kind`.
    pub fn publish(&self, kind: MetricKind, raw: f64) {
        let slot = &self.slots[kind.index()];
        if slot.active.load(Ordering::Acquire) {
            slot.value.store(raw.to_bits(), Ordering::Release);
        }
    }

    /// Whether the slot for `kind` is started.
    pub fn is_active(&self, kind: MetricKind) -> bool {
        self.slots[kind.index()].active.load(Ordering::Acquire)
    }
}

impl SampleSource for RecorderBank {
    fn source_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("recorder-bank")
    }

    fn start(&self, kind: MetricKind) -> Result<(), SourceError> {
        let slot = &self.slots[kind.index()];
        slot.value.store(0f64.to_bits(), Ordering::Release);
        slot.active.store(true, Ordering::Release);
        log::debug!("Recorder slot for {} started", kind);
        Ok(())
    }

    fn stop(&self, kind: MetricKind) -> Result<(), SourceError> {
        let slot = &self.slots[kind.index()];
        if slot.active.swap(false, Ordering::AcqRel) {
            log::debug!("Recorder slot for {} stopped", kind);
        }
        Ok(())
    }

    fn current_value(&self, kind: MetricKind) -> f64 {
        let slot = &self.slots[kind.index()];
        if !slot.active.load(Ordering::Acquire) {
            return 0.0;
        }
        f64::from_bits(slot.value.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_publish_requires_start() {
        let bank = RecorderBank::new();
        bank.publish(MetricKind::RenderThread, 16_000_000.0);
        assert_eq!(bank.current_value(MetricKind::RenderThread), 0.0);

        bank.start(MetricKind::RenderThread).unwrap();
        assert_eq!(bank.current_value(MetricKind::RenderThread), 0.0);
        bank.publish(MetricKind::RenderThread, 16_000_000.0);
        assert_eq!(bank.current_value(MetricKind::RenderThread), 16_000_000.0);
    }

    #[test]
    fn test_stop_clears_reading_and_is_idempotent() {
        let bank = RecorderBank::new();
        bank.start(MetricKind::MainThread).unwrap();
        bank.publish(MetricKind::MainThread, 1.6);

        bank.stop(MetricKind::MainThread).unwrap();
        bank.stop(MetricKind::MainThread).unwrap();
        assert!(!bank.is_active(MetricKind::MainThread));
        assert_eq!(bank.current_value(MetricKind::MainThread), 0.0);
    }

    #[test]
    fn test_slots_are_independent() {
        let bank = RecorderBank::new();
        bank.start(MetricKind::RenderThread).unwrap();
        bank.publish(MetricKind::RenderThread, 5.0);
        bank.publish(MetricKind::MainThread, 7.0);
        assert_eq!(bank.current_value(MetricKind::RenderThread), 5.0);
        assert_eq!(bank.current_value(MetricKind::MainThread), 0.0);
    }

    #[test]
    fn test_publish_from_producer_thread() {
        let bank = Arc::new(RecorderBank::new());
        bank.start(MetricKind::RenderThread).unwrap();

        let producer = {
            let bank = bank.clone();
            thread::spawn(move || {
                for frame in 1..=100 {
                    bank.publish(MetricKind::RenderThread, frame as f64 * 1_000_000.0);
                }
            })
        };
        producer.join().unwrap();

        assert_eq!(bank.current_value(MetricKind::RenderThread), 100_000_000.0);
    }
}
