//! Sampling diagnostics: timing and counts for a single sampler call.
//!
//! Used by `linemarks-bench` to tune spacing against real data and to
//! see how much of a line an extent cuts away.
//!
//! Time is read through the [`Clock`] trait so the library stays free of
//! platform assumptions. [`WebClock`] uses the `web-time` crate, which
//! maps to `performance.now()` on WASM and `std::time::Instant` on native.
//!
//! Durations are serialized as fractional seconds (`f64`) since
//! `std::time::Duration` does not implement serde traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sampler;
use crate::types::{Polyline, SampleConfig, SampleError, SamplePoint};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Source of monotonic time for diagnostics.
pub trait Clock {
    /// Opaque point in time.
    type Instant;

    /// The current instant.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// [`Clock`] backed by [`web_time::Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClock;

impl Clock for WebClock {
    type Instant = web_time::Instant;

    fn now(&self) -> web_time::Instant {
        web_time::Instant::now()
    }

    fn elapsed(&self, since: &web_time::Instant) -> Duration {
        since.elapsed()
    }
}

/// Diagnostics collected from one sampler call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDiagnostics {
    /// Wall-clock duration of validation plus the walk (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Vertices in the input polyline.
    pub vertex_count: usize,
    /// Zero-length edges skipped by the walk.
    pub degenerate_edge_count: usize,
    /// Total line length.
    pub line_length: f64,
    /// Requested spacing.
    pub graphic_spacing: f64,
    /// Number of equal segments the line was divided into.
    pub segment_count: usize,
    /// Actual spacing between boundaries.
    pub segment_length: f64,
    /// Whether samples were taken at segment centres.
    pub mid_points: bool,
    /// Samples computed by the walk, before extent filtering.
    pub computed_count: usize,
    /// Samples that passed the extent filter.
    pub emitted_count: usize,
}

impl SampleDiagnostics {
    /// Samples dropped by the extent filter.
    #[must_use]
    pub const fn filtered_count(&self) -> usize {
        self.computed_count - self.emitted_count
    }

    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Sampler Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Line: {} vertices ({} zero-length edges), length {:.3}",
            self.vertex_count, self.degenerate_edge_count, self.line_length,
        ));
        lines.push(format!(
            "Spacing: requested {:.3}, actual {:.3} ({} segments)",
            self.graphic_spacing, self.segment_length, self.segment_count,
        ));
        lines.push(format!(
            "Mode: {}",
            if self.mid_points {
                "segment midpoints"
            } else {
                "segment boundaries"
            },
        ));
        lines.push(format!(
            "Samples: {} computed, {} emitted, {} outside extent",
            self.computed_count,
            self.emitted_count,
            self.filtered_count(),
        ));
        lines.push(format!("Duration: {:.3}ms", duration_ms(self.duration)));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
#[must_use]
pub fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Run [`sampler::sample`] and collect diagnostics alongside the samples.
///
/// # Errors
///
/// Same as [`sampler::sample`].
pub fn sample_with_diagnostics<C: Clock>(
    polyline: &Polyline,
    graphic_spacing: f64,
    config: &SampleConfig,
    clock: &C,
) -> Result<(Vec<SamplePoint>, SampleDiagnostics), SampleError> {
    let started = clock.now();

    let line_walk = sampler::walk(polyline, graphic_spacing, config)?;
    let line_length = line_walk.line_length();
    let segment_count = line_walk.segment_count();
    let segment_length = line_walk.segment_length();
    let degenerate_edge_count = line_walk.degenerate_edge_count();

    let mut computed_count = 0;
    let samples: Vec<SamplePoint> = line_walk
        .inspect(|_| computed_count += 1)
        .filter(|s| config.keeps(s.point()))
        .collect();

    let diagnostics = SampleDiagnostics {
        duration: clock.elapsed(&started),
        vertex_count: polyline.len(),
        degenerate_edge_count,
        line_length,
        graphic_spacing,
        segment_count,
        segment_length,
        mid_points: config.mid_points,
        computed_count,
        emitted_count: samples.len(),
    };
    log::debug!(
        "sampled {} of {} points in {:.3}ms",
        diagnostics.emitted_count,
        diagnostics.computed_count,
        duration_ms(diagnostics.duration),
    );

    Ok((samples, diagnostics))
}
