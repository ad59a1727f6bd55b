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

//! System Memory Sample Source
//!
//! Reports used system memory through the `sysinfo` crate.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, TryLockError};
use std::time::{Duration, Instant};

use framepulse_core::{MetricKind, SampleSource, SourceError};
use sysinfo::System;

/// Minimum time between two OS memory queries.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
struct Probe {
    system: System,
    last_refresh: Option<Instant>,
}

/// Sample source for [`MetricKind::SystemMemory`].
///
/// Readings are in kibibytes. `refresh_memory` is an OS query, so reads issue
/// it at most once per refresh interval and otherwise return the cached value.
/// A read that finds another thread holding the `sysinfo` handle also returns
/// the cached value instead of waiting.
#[derive(Debug)]
pub struct SystemMemorySource {
    probe: Mutex<Probe>,
    refresh_interval: Duration,
    used_kib: AtomicU64,
    active: AtomicBool,
    poison_reported: AtomicBool,
}

impl SystemMemorySource {
    /// Creates a new, inactive memory source.
    pub fn new() -> Self {
        Self::with_refresh_interval(DEFAULT_REFRESH_INTERVAL)
    }

    /// Creates a memory source querying the OS at most once per `interval`.
    pub fn with_refresh_interval(interval: Duration) -> Self {
        Self {
            probe: Mutex::new(Probe {
                system: System::new(),
                last_refresh: None,
            }),
            refresh_interval: interval,
            used_kib: AtomicU64::new(0),
            active: AtomicBool::new(false),
            poison_reported: AtomicBool::new(false),
        }
    }

    fn try_probe(&self) -> Option<MutexGuard<'_, Probe>> {
        match self.probe.try_lock() {
            Ok(probe) => Some(probe),
            Err(TryLockError::WouldBlock) => None,
            Err(TryLockError::Poisoned(poisoned)) => {
                // Probe has no cross-field invariant.
                if !self.poison_reported.swap(true, Ordering::Relaxed) {
                    log::warn!("sysinfo handle was poisoned by a panicking thread; recovering");
                }
                Some(poisoned.into_inner())
            }
        }
    }

    /// Refreshes the cached reading if it is stale (or `force` is set) and the
    /// `sysinfo` handle is free.
    fn refresh(&self, force: bool) {
        let Some(mut probe) = self.try_probe() else {
            return;
        };
        let fresh = matches!(
            probe.last_refresh,
            Some(at) if at.elapsed() < self.refresh_interval
        );
        if force || !fresh {
            probe.system.refresh_memory();
            probe.last_refresh = Some(Instant::now());
            self.used_kib.store(probe.system.used_memory() / 1024, Ordering::Relaxed);
        }
    }

    /// Whether the recorder is started.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Default for SystemMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for SystemMemorySource {
    fn source_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("sysinfo-memory")
    }

    fn start(&self, kind: MetricKind) -> Result<(), SourceError> {
        if kind != MetricKind::SystemMemory {
            return Err(SourceError::Unsupported(kind));
        }
        self.active.store(true, Ordering::Release);
        self.refresh(true);
        log::info!("System memory recorder started");
        Ok(())
    }

    fn stop(&self, kind: MetricKind) -> Result<(), SourceError> {
        if kind != MetricKind::SystemMemory {
            return Err(SourceError::Unsupported(kind));
        }
        if self.active.swap(false, Ordering::AcqRel) {
            log::info!("System memory recorder stopped");
        }
        Ok(())
    }

    fn current_value(&self, kind: MetricKind) -> f64 {
        if kind != MetricKind::SystemMemory || !self.is_active() {
            return 0.0;
        }
        self.refresh(false);
        self.used_kib.load(Ordering::Relaxed) as f64
    }
}
