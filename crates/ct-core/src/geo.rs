//! Planar coordinate type and distance utilities.
//!
//! The world is a flat square plane centred on the origin, so distance is
//! plain Euclidean.  Headings are radians in the usual mathematical sense
//! (0 = +x, counter-clockwise positive).

/// Within this distance a moving courier snaps onto its target point.
///
/// Coarse: used for path snapping only, never for completion events.
pub const SNAP_TOLERANCE: f64 = 2.0;

/// Within this distance a courier counts as having arrived (pickup, rest
/// arrival, delivery completion).
pub const ARRIVAL_TOLERANCE: f64 = 0.5;

/// A point on the simulation plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Heading (radians) that faces `other`.  Returns 0 for coincident points.
    #[inline]
    pub fn heading_to(self, other: Point) -> f64 {
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        if dx == 0.0 && dy == 0.0 {
            return 0.0;
        }
        dy.atan2(dx)
    }

    /// The point `len` units away along `heading`.
    #[inline]
    pub fn advanced(self, heading: f64, len: f64) -> Point {
        Point {
            x: self.x + heading.cos() * len,
            y: self.y + heading.sin() * len,
        }
    }

    /// `true` if `other` is within `tolerance` (inclusive).
    #[inline]
    pub fn within(self, other: Point, tolerance: f64) -> bool {
        self.distance(other) <= tolerance
    }

    /// `true` if both coordinates lie in `[-half_extent, half_extent]`.
    #[inline]
    pub fn in_bounds(self, half_extent: f64) -> bool {
        self.x.abs() <= half_extent && self.y.abs() <= half_extent
    }

    /// Clamp both coordinates into `[-half_extent, half_extent]`.
    #[inline]
    pub fn clamped(self, half_extent: f64) -> Point {
        Point {
            x: self.x.clamp(-half_extent, half_extent),
            y: self.y.clamp(-half_extent, half_extent),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
