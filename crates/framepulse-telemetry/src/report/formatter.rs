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

//! The fixed text report.

use crate::snapshot::{MetricView, Snapshot};
use framepulse_core::{MetricKind, Quantity};
use std::fmt::Write;

/// Order in which timing metrics appear in a text report.
const TIMING_ORDER: [MetricKind; 3] = [
    MetricKind::FrameDelta,
    MetricKind::RenderThread,
    MetricKind::MainThread,
];

/// Renders a [`Snapshot`] for a host-provided sink (text overlay, console, ...).
pub trait ReportFormatter {
    /// Renders `snapshot`. Must be a pure projection of its input.
    fn format(&self, snapshot: &Snapshot) -> String;
}

/// The fixed multi-line text report.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl ReportFormatter for TextReport {
    fn format(&self, snapshot: &Snapshot) -> String {
        format_report(snapshot)
    }
}

/// Renders the fixed text report.
///
/// Durations are printed with two decimals, rates with none, and memory as a
/// whole number of megabytes (truncated).
pub fn format_report(snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(512);

    // fmt::Write for String is infallible.
    let _ = writeln!(out, "Frame Count: {}", snapshot.tick);
    out.push_str("--------------------\n");
    if let Some(memory) = snapshot.metric(MetricKind::SystemMemory) {
        let _ = writeln!(
            out,
            "{}: {} {}",
            memory.kind.label(),
            memory.instantaneous.trunc() as i64,
            Quantity::Memory.unit_suffix()
        );
    }
    out.push('\n');

    for kind in TIMING_ORDER {
        let Some(view) = snapshot.metric(kind) else {
            continue;
        };
        match kind.quantity() {
            Quantity::Duration => {
                if let Some(rate) = view.frame_rate() {
                    write_rate_block(&mut out, &rate);
                }
                write_duration_block(&mut out, view);
            }
            Quantity::Rate => write_rate_block(&mut out, view),
            Quantity::Memory => {}
        }
    }

    out
}

fn write_rate_block(out: &mut String, view: &MetricView) {
    let _ = writeln!(out, "FPS ({}): {:.0}", view.kind.label(), view.instantaneous);
    let _ = writeln!(out, "Avg. FPS: {:.0}", view.average);
    let _ = writeln!(out, "Min FPS: {:.0}", view.min);
    let _ = writeln!(out, "Max FPS: {:.0}", view.max);
    out.push('\n');
}

fn write_duration_block(out: &mut String, view: &MetricView) {
    let unit = Quantity::Duration.unit_suffix();
    let label = view.kind.label();
    let _ = writeln!(out, "Draw Time ({label}): {:.2} {unit}", view.instantaneous);
    let _ = writeln!(out, "Avg. Draw Time: {:.2} {unit}", view.average);
    let _ = writeln!(out, "Min. Draw Time: {:.2} {unit}", view.min);
    let _ = writeln!(out, "Max. Draw Time: {:.2} {unit}", view.max);
    out.push('\n');
}
