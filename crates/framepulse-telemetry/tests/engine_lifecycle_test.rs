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

use std::borrow::Cow;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use framepulse_core::{MetricKind, SampleSource, SourceError, SENTINEL};
use framepulse_telemetry::{format_report, AggregationEngine, AggregatorConfig};

// --- MOCK SOURCE FOR THESE TESTS ---

/// Plays back scripted raw readings and records every lifecycle call.
#[derive(Debug, Default)]
struct ScriptedSource {
    readings: Mutex<[VecDeque<f64>; MetricKind::COUNT]>,
    refuse_start: Vec<MetricKind>,
    log: Mutex<Vec<(&'static str, MetricKind)>>,
}

impl ScriptedSource {
    fn with_readings(kind: MetricKind, values: &[f64]) -> Self {
        let source = Self::default();
        source.push(kind, values);
        source
    }

    fn push(&self, kind: MetricKind, values: &[f64]) {
        self.readings.lock().unwrap()[kind.index()].extend(values.iter().copied());
    }

    fn calls(&self, op: &str) -> Vec<MetricKind> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| *name == op)
            .map(|(_, kind)| *kind)
            .collect()
    }
}

impl SampleSource for ScriptedSource {
    fn source_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("scripted")
    }

    fn start(&self, kind: MetricKind) -> Result<(), SourceError> {
        self.log.lock().unwrap().push(("start", kind));
        if self.refuse_start.contains(&kind) {
            return Err(SourceError::Backend {
                kind,
                message: "recorder unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn stop(&self, kind: MetricKind) -> Result<(), SourceError> {
        self.log.lock().unwrap().push(("stop", kind));
        Ok(())
    }

    fn current_value(&self, kind: MetricKind) -> f64 {
        self.readings.lock().unwrap()[kind.index()]
            .pop_front()
            .unwrap_or(0.0)
    }
}

fn config(sampling_interval: u32, window_size: u32, metrics: &[MetricKind]) -> AggregatorConfig {
    AggregatorConfig::default()
        .with_sampling_interval(sampling_interval)
        .with_window_size(window_size)
        .with_metrics(metrics.iter().copied())
}

#[test]
fn test_default_cadence_closes_every_window_once() {
    // --- 1. ARRANGE ---
    let source = Arc::new(ScriptedSource::default());
    let mut engine = AggregationEngine::new(AggregatorConfig::default()).unwrap();
    engine.enable(source.clone());

    // --- 2. ACT ---
    let mut sampling_ticks = 0;
    for _ in 0..500 {
        if engine.tick(0.016).is_some() {
            sampling_ticks += 1;
        }
    }

    // --- 3. ASSERT ---
    assert_eq!(sampling_ticks, 50);
    assert_eq!(engine.windows_closed(), 1);
    assert_eq!(engine.tick_counter(), 0);
    let accumulators = engine.accumulators().unwrap();
    assert_eq!(accumulators.len(), 3);
    for (kind, acc) in accumulators.tracked() {
        assert_eq!(acc.sample_count(), 0, "{kind} window should be reset");
    }

    // Frame delta was valid every sample; the scripted recorders never produced data.
    let snapshot = engine.snapshot().unwrap();
    let delta = snapshot.metric(MetricKind::FrameDelta).unwrap();
    assert_relative_eq!(delta.average, 16.0, epsilon = 1e-9);
    let render = snapshot.metric(MetricKind::RenderThread).unwrap();
    assert_eq!(render.average, SENTINEL);
    assert_eq!(render.instantaneous, SENTINEL);
}

#[test]
fn test_mixed_readings_scenario() {
    // --- 1. ARRANGE ---
    // 16 ms, 20 ms, an outlier burst, 18 ms.
    let source = Arc::new(ScriptedSource::with_readings(
        MetricKind::RenderThread,
        &[16_000_000.0, 20_000_000.0, 500_000.0, 18_000_000.0],
    ));
    let mut engine =
        AggregationEngine::new(config(1, 4, &[MetricKind::RenderThread])).unwrap();
    engine.enable(source);

    // --- 2. ACT ---
    let snapshots: Vec<_> = (0..4).filter_map(|_| engine.tick(0.0)).collect();

    // --- 3. ASSERT ---
    assert_eq!(snapshots.len(), 4);
    let outlier = snapshots[2].metric(MetricKind::RenderThread).unwrap();
    assert_eq!(outlier.instantaneous, SENTINEL);

    let closed = snapshots[3].metric(MetricKind::RenderThread).unwrap();
    assert_relative_eq!(closed.average, 18.0);
    assert_relative_eq!(closed.min, 16.0);
    assert_relative_eq!(closed.max, 20.0);

    let acc = engine
        .accumulators()
        .and_then(|set| set.get(MetricKind::RenderThread))
        .unwrap();
    assert_eq!(acc.sample_count(), 0);
    assert_eq!(acc.running_min(), 16.0);
    assert_eq!(acc.running_max(), 20.0);

    let rate = snapshots[3].frame_rate(MetricKind::RenderThread).unwrap();
    assert_relative_eq!(rate.min, 50.0);
    assert_relative_eq!(rate.max, 62.5);
}

#[test]
fn test_empty_window_carries_previous_average() {
    // --- 1. ARRANGE ---
    let source = Arc::new(ScriptedSource::with_readings(
        MetricKind::RenderThread,
        &[10_000_000.0, 30_000_000.0],
    ));
    let mut engine = AggregationEngine::new(config(1, 2, &[MetricKind::RenderThread])).unwrap();
    engine.enable(source);

    // --- 2. ACT ---
    engine.tick(0.0);
    let first = engine.tick(0.0).unwrap();
    engine.tick(0.0);
    let second = engine.tick(0.0).unwrap();

    // --- 3. ASSERT ---
    let first = first.metric(MetricKind::RenderThread).unwrap();
    let second = second.metric(MetricKind::RenderThread).unwrap();
    assert_relative_eq!(first.average, 20.0);
    assert_relative_eq!(second.average, 20.0);
    assert_eq!(second.instantaneous, SENTINEL);
    assert_eq!(engine.windows_closed(), 2);
}

#[test]
fn test_every_attempted_recorder_is_stopped() {
    // --- 1. ARRANGE ---
    let source = Arc::new(ScriptedSource {
        refuse_start: vec![MetricKind::MainThread],
        ..Default::default()
    });
    let mut engine = AggregationEngine::new(config(
        10,
        100,
        &[
            MetricKind::SystemMemory,
            MetricKind::RenderThread,
            MetricKind::MainThread,
            MetricKind::FrameDelta,
        ],
    ))
    .unwrap();

    // --- 2. ACT ---
    engine.enable(source.clone());
    let started = engine.started_recorders().to_vec();
    let failed: Vec<_> = engine.failed_recorders().iter().map(|(kind, _)| *kind).collect();
    engine.disable();

    // --- 3. ASSERT ---
    let attempted = vec![
        MetricKind::SystemMemory,
        MetricKind::RenderThread,
        MetricKind::MainThread,
    ];
    assert_eq!(source.calls("start"), attempted);
    assert_eq!(started, vec![MetricKind::SystemMemory, MetricKind::RenderThread]);
    assert_eq!(failed, vec![MetricKind::MainThread]);
    // A refused start may still have acquired something, so it is released too.
    assert_eq!(
        source.calls("stop"),
        vec![
            MetricKind::MainThread,
            MetricKind::RenderThread,
            MetricKind::SystemMemory
        ]
    );
}

#[test]
fn test_dropping_enabled_engine_releases_recorders() {
    let source = Arc::new(ScriptedSource::default());
    {
        let mut engine = AggregationEngine::new(config(1, 1, &[MetricKind::RenderThread])).unwrap();
        engine.enable(source.clone());
        engine.tick(0.0);
    }
    assert_eq!(source.calls("stop"), vec![MetricKind::RenderThread]);
}

#[test]
fn test_reenable_starts_fresh() {
    // --- 1. ARRANGE ---
    let source = Arc::new(ScriptedSource::with_readings(
        MetricKind::RenderThread,
        &[40_000_000.0],
    ));
    let mut engine = AggregationEngine::new(config(1, 10, &[MetricKind::RenderThread])).unwrap();
    engine.enable(source.clone());
    engine.tick(0.0);

    // --- 2. ACT ---
    engine.enable(source.clone());

    // --- 3. ASSERT ---
    assert_eq!(source.calls("start").len(), 2);
    assert_eq!(source.calls("stop").len(), 1);
    assert_eq!(engine.tick_counter(), 0);
    let acc = engine
        .accumulators()
        .and_then(|set| set.get(MetricKind::RenderThread))
        .unwrap();
    assert_eq!(acc.sample_count(), 0);
    assert_eq!(acc.snapshot().max, SENTINEL);
}

#[test]
fn test_report_reflects_engine_state() {
    // --- 1. ARRANGE ---
    let source = Arc::new(ScriptedSource::with_readings(
        MetricKind::SystemMemory,
        &[3_145_728.0],
    ));
    source.push(MetricKind::RenderThread, &[20_000_000.0]);
    let mut engine = AggregationEngine::new(config(
        1,
        1,
        &[MetricKind::SystemMemory, MetricKind::RenderThread],
    ))
    .unwrap();
    engine.enable(source);

    // --- 2. ACT ---
    let report = format_report(&engine.tick(0.0).unwrap());

    // --- 3. ASSERT ---
    assert!(report.starts_with("Frame Count: 0\n--------------------\nSystem Memory: 3072 MB\n"));
    assert!(report.contains("FPS (Render Thread): 50\n"));
    assert!(report.contains("Avg. Draw Time: 20.00 ms\n"));
    assert!(!report.contains("Combined Threads"));
}

#[test]
fn test_infinite_reading_is_reported_as_sentinel() {
    // --- 1. ARRANGE ---
    let source = Arc::new(ScriptedSource::with_readings(
        MetricKind::RenderThread,
        &[20_000_000.0, f64::INFINITY],
    ));
    let mut engine =
        AggregationEngine::new(config(1, 10, &[MetricKind::RenderThread])).unwrap();
    engine.enable(source);

    // --- 2. ACT ---
    engine.tick(0.0);
    let snapshot = engine.tick(0.0).unwrap();
    let report = format_report(&snapshot);

    // --- 3. ASSERT ---
    let render = snapshot.metric(MetricKind::RenderThread).unwrap();
    assert_eq!(render.instantaneous, SENTINEL);
    assert_relative_eq!(render.max, 20.0);
    let acc = engine
        .accumulators()
        .and_then(|set| set.get(MetricKind::RenderThread))
        .unwrap();
    assert_eq!(acc.sample_count(), 1);
    assert!(report.contains("Draw Time (Render Thread): -1.00 ms\n"));
    assert!(!report.contains("inf"));
}
