//! linemarks-sampler: evenly-spaced, oriented points along a polyline (sans-IO).
//!
//! Places anchors for repeated symbols (arrows, ticks, flow markers) along
//! a line feature:
//! measure the line -> divide it into equal segments -> walk the edges ->
//! emit each segment boundary (or centre) with the bearing of its edge ->
//! optionally keep only samples inside an extent.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! polylines and returns structured data. Rendering the symbols is left
//! to the caller.

pub mod diagnostics;
pub mod geometry;
pub mod sampler;
pub mod types;

pub use diagnostics::{Clock, SampleDiagnostics, WebClock, sample_with_diagnostics};
pub use sampler::{LineWalk, sample, sample_iter, walk};
pub use types::{Extent, Point, Polyline, SampleConfig, SampleError, SamplePoint};
