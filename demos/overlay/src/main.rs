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

// FramePulse overlay demo
// Drives the aggregator from a simulated frame loop and prints its report.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use framepulse_core::MetricKind;
use framepulse_infra::{HostRecorders, RecorderBank};
use framepulse_telemetry::{AggregationEngine, AggregatorConfig, ReportFormatter, TextReport};

#[derive(Debug, Parser)]
#[command(about = "Simulated host loop for the FramePulse aggregator")]
struct Args {
    /// JSON aggregator configuration. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 1500)]
    frames: u32,

    /// Target frame rate of the simulated host loop.
    #[arg(long, default_value_t = 240)]
    fps: u32,
}

/// Stand-in for a render thread: publishes a jittering render time every frame.
fn spawn_render_thread(
    bank: Arc<RecorderBank>,
    frame_time: Duration,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let base_ns = frame_time.as_nanos() as f64 * 0.6;
        let mut frame: u64 = 0;
        while running.load(Ordering::Acquire) {
            // Deterministic jitter plus an occasional near-zero glitch.
            let jitter = ((frame % 17) as f64 - 8.0) / 40.0;
            let raw = if frame % 97 == 0 {
                250_000.0
            } else {
                base_ns * (1.0 + jitter)
            };
            bank.publish(MetricKind::RenderThread, raw);
            frame += 1;
            thread::sleep(frame_time);
        }
    })
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AggregatorConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AggregatorConfig::default(),
    };
    let mut engine = AggregationEngine::new(config).context("invalid aggregator configuration")?;

    let frame_time = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
    let host = Arc::new(HostRecorders::new());
    let running = Arc::new(AtomicBool::new(true));
    let render_thread = spawn_render_thread(host.bank().clone(), frame_time, running.clone());

    engine.enable(host.clone());
    let formatter = TextReport;
    let mut last_frame = Instant::now();
    let mut windows_reported = 0;

    for _ in 0..args.frames {
        thread::sleep(frame_time);
        let now = Instant::now();
        let delta = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        if let Some(snapshot) = engine.tick(delta) {
            if snapshot.windows_closed > windows_reported {
                windows_reported = snapshot.windows_closed;
                println!("{}", formatter.format(&snapshot));
            }
        }
    }

    engine.disable();
    running.store(false, Ordering::Release);
    if render_thread.join().is_err() {
        log::warn!("Render thread panicked");
    }

    Ok(())
}
