//! Integer plane geometry: corners, port footprints, and interval overlap.

use serde::{Deserialize, Serialize};

/// A corner coordinate in global layout units.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Point) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Axis-aligned port footprint given by two diagonal corners.
///
/// The corners are not normalized: `start` sits on the hosting edge at the
/// port's offset, `end` is diagonally opposite, displaced along the edge by the
/// port length and perpendicular to it by the port width.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Footprint {
    /// Corner on the edge at the port offset.
    pub start: Point,
    /// Diagonally opposite corner.
    pub end: Point,
}

impl Footprint {
    /// Center of the footprint.
    pub fn midpoint(&self) -> (f64, f64) {
        (
            (self.start.x + self.end.x) as f64 / 2.0,
            (self.start.y + self.end.y) as f64 / 2.0,
        )
    }

    /// Euclidean distance between the midpoints of two footprints.
    pub fn distance(&self, other: &Footprint) -> f64 {
        let (x1, y1) = self.midpoint();
        let (x2, y2) = other.midpoint();
        ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
    }

    /// Largest side of the footprint.
    pub fn extent(&self) -> i64 {
        (self.end.y - self.start.y)
            .abs()
            .max((self.start.x - self.end.x).abs())
    }

    /// The four corners in export order: `(xs, ys)`, `(xs, ye)`, `(xe, ye)`, `(xe, ys)`.
    pub fn corners(&self) -> [Point; 4] {
        let (s, e) = (self.start, self.end);
        [
            Point::new(s.x, s.y),
            Point::new(s.x, e.y),
            Point::new(e.x, e.y),
            Point::new(e.x, s.y),
        ]
    }
}

/// Shared length of two half-open intervals `[pos, pos + len)`.
///
/// Containment caps the overlap at the contained interval's length.
pub fn interval_overlap(a: (i64, i64), b: (i64, i64)) -> i64 {
    let ((first_pos, first_len), (second_pos, second_len)) = if b.0 < a.0 { (b, a) } else { (a, b) };
    let first_end = first_pos + first_len;
    if first_end <= second_pos {
        0
    } else {
        (first_end - second_pos).min(second_len)
    }
}
