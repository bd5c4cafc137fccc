//! Line sampling: evenly-spaced, oriented anchor points along a polyline.
//!
//! The line of length `L` is divided into `n = ceil(L / spacing)` segments
//! of equal length `L / n`, so the actual spacing is never larger than the
//! requested one and the segments tile the whole line. The walk visits the
//! original edges in order, carrying the distance consumed toward the next
//! segment boundary across vertices, and interpolates each boundary on the
//! edge where it falls.
//!
//! Each sample carries the bearing of the edge it lies on, clockwise from
//! north, which is what a renderer needs to rotate an arrow or tick.
//!
//! Zero-length edges (repeated vertices) are skipped: they contribute no
//! length and have no direction.

use std::iter::FusedIterator;

use crate::geometry;
use crate::types::{Point, Polyline, SampleConfig, SampleError, SamplePoint};

/// Exclusive upper bound on the segment count the walk accepts.
///
/// Beyond 2^53 consecutive integers are no longer representable as `f64`
/// and the per-segment length would be meaningless. On targets where
/// `usize` is narrower, the bound is half of `usize::MAX` (exact in `f64`)
/// so that the count and the `n + 1` boundary counter both fit.
#[allow(clippy::cast_precision_loss)]
const MAX_SEGMENT_COUNT: f64 = if usize::BITS < 53 {
    (usize::MAX / 2) as f64
} else {
    (1_u64 << 53) as f64
};

/// Sample a polyline at (approximately) `graphic_spacing` intervals.
///
/// Returns the samples in traversal order, keeping only those inside
/// `config.extent` when one is set. Without `mid_points` the samples are
/// the segment boundaries, from the first vertex to the last; with
/// `mid_points` they are the segment centres.
///
/// # Examples
///
/// ```
/// use linemarks_sampler::{Point, Polyline, SampleConfig, sample};
///
/// let line = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
/// let samples = sample(&line, 5.0, &SampleConfig::default()).unwrap();
/// let xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
/// assert_eq!(xs, vec![0.0, 5.0, 10.0]);
/// ```
///
/// # Errors
///
/// Returns [`SampleError::TooFewVertices`] for fewer than 2 vertices,
/// [`SampleError::NonFiniteCoordinate`] for NaN or infinite coordinates,
/// [`SampleError::InvalidSpacing`] for a spacing that is not positive and
/// finite, [`SampleError::InvalidExtent`] for a non-finite extent, and
/// [`SampleError::DegenerateLine`] when the line has zero length, and
/// [`SampleError::LineTooLong`] when the summed edge lengths overflow.
pub fn sample(
    polyline: &Polyline,
    graphic_spacing: f64,
    config: &SampleConfig,
) -> Result<Vec<SamplePoint>, SampleError> {
    Ok(sample_iter(polyline, graphic_spacing, config)?.collect())
}

/// Lazy, extent-filtered version of [`sample`].
///
/// # Errors
///
/// Same as [`sample`]. All validation happens before the iterator is
/// returned.
pub fn sample_iter<'a>(
    polyline: &'a Polyline,
    graphic_spacing: f64,
    config: &SampleConfig,
) -> Result<impl Iterator<Item = SamplePoint> + 'a, SampleError> {
    let config = *config;
    Ok(walk(polyline, graphic_spacing, &config)?.filter(move |s| config.keeps(s.point())))
}

/// Start an unfiltered walk along `polyline`.
///
/// The returned [`LineWalk`] yields every computed sample, ignoring
/// `config.extent`; it also exposes the segment count and length chosen
/// for the line.
///
/// # Errors
///
/// Same as [`sample`].
pub fn walk<'a>(
    polyline: &'a Polyline,
    graphic_spacing: f64,
    config: &SampleConfig,
) -> Result<LineWalk<'a>, SampleError> {
    let vertices = polyline.points();
    if vertices.len() < 2 {
        return Err(SampleError::TooFewVertices {
            count: vertices.len(),
        });
    }
    if let Some(index) = vertices.iter().position(|p| !p.is_finite()) {
        return Err(SampleError::NonFiniteCoordinate { index });
    }
    if !(graphic_spacing.is_finite() && graphic_spacing > 0.0) {
        return Err(SampleError::InvalidSpacing(graphic_spacing));
    }
    config.validate()?;

    let line_length = polyline.length();
    if !line_length.is_finite() {
        return Err(SampleError::LineTooLong);
    }
    if line_length <= 0.0 {
        return Err(SampleError::DegenerateLine);
    }

    let ratio = line_length / graphic_spacing;
    if !ratio.is_finite() || ratio.ceil() >= MAX_SEGMENT_COUNT {
        return Err(SampleError::InvalidSpacing(graphic_spacing));
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let segment_count = (ratio.ceil() as usize).max(1);
    #[allow(clippy::cast_precision_loss)]
    let segment_length = line_length / segment_count as f64;

    let degenerate_edges = polyline
        .edges()
        .filter(|&(a, b)| is_degenerate(a, b))
        .count();

    log::debug!(
        "walking {} vertices: length {line_length}, {segment_count} segments of {segment_length}",
        vertices.len(),
    );
    if degenerate_edges > 0 {
        log::debug!("skipping {degenerate_edges} zero-length edge(s)");
    }

    let mut line_walk = LineWalk {
        vertices,
        edge: 0,
        start: vertices[0],
        next: vertices[1],
        angle: 0.0,
        invert_y: config.invert_y,
        mid_points: config.mid_points,
        line_length,
        segment_count,
        segment_length,
        degenerate_edges,
        accumulated: if config.mid_points {
            segment_length / 2.0
        } else {
            segment_length
        },
        remaining: segment_count + 1,
        state: State::Walking,
    };

    // The positive length guarantees at least one usable edge.
    if !line_walk.enter_edge_from(0) {
        return Err(SampleError::DegenerateLine);
    }
    Ok(line_walk)
}

/// Returns `true` if the edge `a -> b` has no measurable length.
fn is_degenerate(a: Point, b: Point) -> bool {
    a.distance(b) <= 0.0
}

/// Where the walk currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Consuming the current edge.
    Walking,
    /// The last vertex was reached or every boundary was emitted.
    Finished,
}

/// Outcome of consuming the remainder of the current edge.
enum Step {
    /// A segment boundary fell on this edge; the walk continues from it.
    Split(SamplePoint),
    /// The edge ran out first; the cursor moved to the next edge.
    NextEdge,
    /// The edge ran out and it was the last one.
    EndOfLine(Option<SamplePoint>),
}

/// Lazy walk along a polyline producing unfiltered samples.
///
/// Created by [`walk`]. Borrows the polyline immutably; split points are
/// kept in the walk's own state. Once it returns `None` it keeps
/// returning `None`.
#[derive(Debug, Clone)]
pub struct LineWalk<'a> {
    vertices: &'a [Point],
    /// Index of the vertex that starts the current edge.
    edge: usize,
    /// Where the walk resumes on the current edge: the edge's first
    /// vertex, or the last split point found on it.
    start: Point,
    /// Far end of the current edge.
    next: Point,
    /// Bearing of the current edge.
    angle: f64,
    invert_y: bool,
    mid_points: bool,
    line_length: f64,
    segment_count: usize,
    segment_length: f64,
    degenerate_edges: usize,
    /// Distance consumed toward the next boundary.
    accumulated: f64,
    /// Boundaries that may still be emitted.
    remaining: usize,
    state: State,
}

impl LineWalk<'_> {
    /// Total length of the line.
    #[must_use]
    pub const fn line_length(&self) -> f64 {
        self.line_length
    }

    /// Number of equal segments the line is divided into.
    #[must_use]
    pub const fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Actual distance between consecutive boundaries.
    ///
    /// At most the requested spacing, chosen so the segments tile the
    /// line exactly.
    #[must_use]
    pub const fn segment_length(&self) -> f64 {
        self.segment_length
    }

    /// Number of zero-length edges the walk skips.
    #[must_use]
    pub const fn degenerate_edge_count(&self) -> usize {
        self.degenerate_edges
    }

    /// Move the cursor to the first non-degenerate edge starting at or
    /// after vertex `from`. Returns `false` if there is none.
    fn enter_edge_from(&mut self, from: usize) -> bool {
        let found = self
            .vertices
            .windows(2)
            .enumerate()
            .skip(from)
            .find(|(_, w)| !is_degenerate(w[0], w[1]));
        let Some((index, w)) = found else {
            return false;
        };
        self.edge = index;
        self.start = w[0];
        self.next = w[1];
        self.angle = geometry::bearing(w[0], w[1], self.invert_y);
        true
    }

    /// Consume the rest of the current edge toward the next boundary.
    fn step(&mut self) -> Step {
        let edge_rest = self.start.distance(self.next);
        self.accumulated += edge_rest;

        if self.accumulated < self.segment_length {
            if self.enter_edge_from(self.edge + 1) {
                return Step::NextEdge;
            }
            let last = (!self.mid_points).then_some(SamplePoint::new(self.next, self.angle));
            return Step::EndOfLine(last);
        }

        let overshoot = self.accumulated - self.segment_length;
        let split = geometry::point_toward(self.next, self.start, edge_rest, overshoot);
        log::trace!(
            "boundary at ({}, {}) on edge {}",
            split.x,
            split.y,
            self.edge
        );
        self.start = split;
        self.accumulated = 0.0;
        self.remaining -= 1;
        Step::Split(SamplePoint::new(split, self.angle))
    }
}

impl Iterator for LineWalk<'_> {
    type Item = SamplePoint;

    fn next(&mut self) -> Option<SamplePoint> {
        while self.state == State::Walking {
            if self.remaining == 0 {
                self.state = State::Finished;
                break;
            }
            match self.step() {
                Step::Split(sample) => return Some(sample),
                Step::NextEdge => {}
                Step::EndOfLine(last) => {
                    self.state = State::Finished;
                    return last;
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Walking => (0, Some(self.remaining)),
            State::Finished => (0, Some(0)),
        }
    }
}

impl FusedIterator for LineWalk<'_> {}
