//! Shared types for the line sampler.

use serde::{Deserialize, Serialize};

/// A 2D point in a planar (already projected) coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    ///
    /// Uses `hypot`, so distances between far-apart but finite points do
    /// not overflow through the intermediate squares.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(c: geo::Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// An ordered sequence of vertices joined by straight edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consecutive vertex pairs, in traversal order.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total length: the sum of all edge lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.edges().map(|(a, b)| a.distance(b)).sum()
    }
}

impl From<&geo::LineString<f64>> for Polyline {
    fn from(line: &geo::LineString<f64>) -> Self {
        Self::new(line.coords().map(|&c| Point::from(c)).collect())
    }
}

/// An axis-aligned bounding box used to filter sample points.
///
/// Containment is inclusive on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Lower-left corner (smallest x and y).
    pub min: Point,
    /// Upper-right corner (largest x and y).
    pub max: Point,
}

impl Extent {
    /// Create an extent spanning two opposite corners, in either order.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Returns `true` if `p` lies inside the extent or on its boundary.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns `true` if both corners are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

impl From<geo::Rect<f64>> for Extent {
    fn from(rect: geo::Rect<f64>) -> Self {
        Self::new(rect.min().into(), rect.max().into())
    }
}

/// A computed point along the line, tagged with the bearing of the edge
/// it was found on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Bearing in radians, clockwise from north (from the top of the
    /// surface when the Y axis points down).
    pub angle: f64,
}

impl SamplePoint {
    /// Tag a coordinate with a bearing.
    #[must_use]
    pub const fn new(point: Point, angle: f64) -> Self {
        Self {
            x: point.x,
            y: point.y,
            angle,
        }
    }

    /// The coordinate without its bearing.
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Options controlling how a line is sampled.
///
/// The spacing itself is passed separately to [`crate::sample`] since it
/// is usually derived from the symbol size at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Compute bearings with the Y axis pointing down (screen
    /// coordinates) instead of up (map coordinates).
    pub invert_y: bool,

    /// Sample the centre of each segment instead of its boundaries.
    /// The final vertex is never emitted in this mode.
    pub mid_points: bool,

    /// Only emit samples inside this box. `None` keeps every sample.
    pub extent: Option<Extent>,
}

impl SampleConfig {
    /// Check the configuration for values the sampler cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::InvalidExtent`] if the extent has a
    /// non-finite bound.
    pub fn validate(&self) -> Result<(), SampleError> {
        match self.extent {
            Some(extent) if !extent.is_finite() => Err(SampleError::InvalidExtent),
            _ => Ok(()),
        }
    }

    /// Returns `true` if `p` passes the extent filter.
    #[must_use]
    pub fn keeps(&self, p: Point) -> bool {
        self.extent.is_none_or(|extent| extent.contains(p))
    }
}

/// Errors that can occur before sampling starts.
///
/// Validation happens up front, so a sampler never returns a partial
/// result.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum SampleError {
    /// The polyline has fewer than two vertices.
    #[error("polyline needs at least 2 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },

    /// Spacing is not a positive finite number, or is too small relative
    /// to the line length to count the segments.
    #[error("invalid graphic spacing: {0}")]
    InvalidSpacing(f64),

    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Position of the offending vertex in the polyline.
        index: usize,
    },

    /// The configured extent has a non-finite bound.
    #[error("extent bounds must be finite")]
    InvalidExtent,

    /// Every edge has zero length, so there is nothing to walk.
    #[error("polyline has zero length")]
    DegenerateLine,

    /// The vertices are finite but the summed edge lengths overflow.
    #[error("polyline length is not representable")]
    LineTooLong,
}
