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

//! Provides the foundational types and contracts for frame telemetry.
//!
//! This module defines the "common language" spoken between the host and the
//! aggregator: which metrics exist, which raw units the host reports them in,
//! how those units are normalized, and how a host exposes its readings.
//!
//! `framepulse-telemetry` builds the aggregation service on top of these
//! contracts, while `framepulse-infra` provides concrete sample sources.

pub mod metrics;
pub mod source;
pub mod units;

pub use self::metrics::{MetricKind, Quantity, RawUnit};
pub use self::source::{SampleSource, SourceError};
pub use self::units::SENTINEL;
