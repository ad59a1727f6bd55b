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

//! # FramePulse Telemetry
//!
//! The central aggregation service. It samples a host [`SampleSource`] on a
//! decimated tick cadence, keeps running min/max and windowed averages per
//! metric, and renders the result as a fixed text report.
//!
//! ```no_run
//! use std::sync::Arc;
//! use framepulse_telemetry::{format_report, AggregationEngine, AggregatorConfig};
//! # fn host_source() -> Arc<dyn framepulse_core::SampleSource> { unimplemented!() }
//!
//! let mut engine = AggregationEngine::new(AggregatorConfig::default())?;
//! engine.enable(host_source());
//! for _ in 0..1000 {
//!     if let Some(snapshot) = engine.tick(1.0 / 60.0) {
//!         println!("{}", format_report(&snapshot));
//!     }
//! }
//! engine.disable();
//! # Ok::<(), framepulse_telemetry::ConfigError>(())
//! ```
//!
//! [`SampleSource`]: framepulse_core::SampleSource

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod service;
pub mod shared;
pub mod snapshot;
pub mod utils;

pub use config::AggregatorConfig;
pub use error::{ConfigError, TelemetryError, TelemetryResult};
pub use metrics::{AccumulatorSet, AccumulatorStats, MetricAccumulator};
pub use report::{format_report, ReportFormatter, TextReport};
pub use service::AggregationEngine;
pub use shared::SharedAggregator;
pub use snapshot::{MetricView, Snapshot};
pub use utils::RecorderSession;
