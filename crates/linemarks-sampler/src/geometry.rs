//! Planar helpers used by the line walk.
//!
//! Everything here works on straight edges between two vertices; there is
//! no curve handling.

use std::f64::consts::FRAC_PI_2;

use crate::types::Point;

/// Point on the edge `toward -> from_end`, `distance_back` units from
/// `from_end` in the direction of `toward`.
///
/// `edge_length` must be the (non-zero) distance between the two
/// endpoints; it is passed in because the walk has already computed it.
/// A `distance_back` of zero returns `from_end` exactly.
#[must_use]
pub fn point_toward(from_end: Point, toward: Point, edge_length: f64, distance_back: f64) -> Point {
    let t = distance_back / edge_length;
    Point::new(
        (toward.x - from_end.x).mul_add(t, from_end.x),
        (toward.y - from_end.y).mul_add(t, from_end.y),
    )
}

/// Bearing of the edge `p1 -> p2` in radians, clockwise from north.
///
/// A north-pointing edge `(0,0) -> (0,1)` has bearing 0 and an
/// east-pointing edge `(0,0) -> (1,0)` has bearing `π/2`. With
/// `invert_y` the Y axis points down, so "north" is the top of the
/// screen.
///
/// The result lies in `(-π/2, 3π/2]` and is not normalised further.
#[must_use]
pub fn bearing(p1: Point, p2: Point, invert_y: bool) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let dy = if invert_y { -dy } else { dy };
    FRAC_PI_2 - dy.atan2(dx)
}
