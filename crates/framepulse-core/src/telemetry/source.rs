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

//! The contract between the aggregator and the host's instrumentation.

use std::borrow::Cow;
use std::fmt::{self, Debug, Display};

use super::metrics::MetricKind;

/// The core trait for a host sample source.
///
/// A `SampleSource` is owned by the host, typically living in the
/// `framepulse-infra` crate or in the host application itself. The aggregation
/// engine holds a shared reference to it while enabled, reads the latest raw
/// value of each tracked metric on sampling ticks, and scopes the lifetime of
/// the underlying recorders with [`start`](SampleSource::start) and
/// [`stop`](SampleSource::stop).
pub trait SampleSource: Send + Sync + Debug + 'static {
    /// Returns a unique, human-readable identifier for this source.
    fn source_id(&self) -> Cow<'static, str>;

    /// Acquires whatever host resource backs `kind`.
    fn start(&self, kind: MetricKind) -> Result<(), SourceError>;

    /// Releases the host resource backing `kind`.
    ///
    /// Called for every metric `start` was called for, including those whose
    /// `start` failed. Must tolerate metrics that never started.
    fn stop(&self, kind: MetricKind) -> Result<(), SourceError>;

    /// Returns the latest raw reading of `kind`, in its native raw unit.
    ///
    /// Must not block. Returns `0.0` or a negative value when the recorder has
    /// not produced a sample yet.
    fn current_value(&self, kind: MetricKind) -> f64;
}

/// An error reported by a [`SampleSource`] while acquiring or releasing a recorder.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The source has no recorder for this metric.
    Unsupported(MetricKind),
    /// The operation requires a recorder that was never started.
    NotStarted(MetricKind),
    /// The host backend refused the operation.
    Backend {
        /// The metric the operation was issued for.
        kind: MetricKind,
        /// Backend-specific description of the failure.
        message: String,
    },
}

impl SourceError {
    /// The metric the failed operation was issued for.
    pub fn kind(&self) -> MetricKind {
        match self {
            SourceError::Unsupported(kind) | SourceError::NotStarted(kind) => *kind,
            SourceError::Backend { kind, .. } => *kind,
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unsupported(kind) => write!(f, "No recorder available for {kind}"),
            SourceError::NotStarted(kind) => write!(f, "Recorder for {kind} was not started"),
            SourceError::Backend { kind, message } => {
                write!(f, "Recorder backend error for {kind}: {message}")
            }
        }
    }
}

impl std::error::Error for SourceError {}
