//! Geometry value types shared by the engine and its host.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// An axis-aligned rectangle. Every transform returns a new value.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn max_x(&self) -> f64 { self.x + self.width }

    pub fn max_y(&self) -> f64 { self.y + self.height }

    pub fn center(&self) -> Point {
        Point::new(
            self.x + (self.width / 2.0).floor(),
            self.y + (self.height / 2.0).floor(),
        )
    }

    /// Shrinks the rectangle inward by the given amount on each side.
    pub fn gap(&self, left: f64, right: f64, top: f64, bottom: f64) -> Rect {
        Rect::new(
            self.x + left,
            self.y + top,
            self.width - (left + right),
            self.height - (top + bottom),
        )
    }

    pub fn includes_point(&self, point: Point) -> bool {
        (self.x..=self.max_x()).contains(&point.x) && (self.y..=self.max_y()).contains(&point.y)
    }

    /// Field-wise difference, used to measure how far a window was dragged.
    pub fn subtract(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x - other.x,
            self.y - other.y,
            self.width - other.width,
            self.height - other.height,
        )
    }

    /// The same rectangle with its axes swapped.
    pub fn transposed(&self) -> Rect { Rect::new(self.y, self.x, self.height, self.width) }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Signed growth of each edge of a window. Positive means the edge moved outward.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct RectDelta {
    pub east: f64,
    pub west: f64,
    pub south: f64,
    pub north: f64,
}

impl RectDelta {
    pub const fn new(east: f64, west: f64, south: f64, north: f64) -> Self {
        Self { east, west, south, north }
    }

    /// Decomposes the change from `basis` to `target` into per-edge growth.
    pub fn from_rects(basis: &Rect, target: &Rect) -> Self {
        let diff = target.subtract(basis);
        Self::new(
            diff.width + diff.x,
            -diff.x,
            diff.height + diff.y,
            -diff.y,
        )
    }
}

/// Length of the overlap between `[min1, max1]` and `[min2, max2]`, or zero.
pub fn overlap(min1: f64, max1: f64, min2: f64, max2: f64) -> f64 {
    f64::max(0.0, f64::min(max1, max2) - f64::max(min1, min2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_floors_half_extent() {
        let rect = Rect::new(10.0, 20.0, 101.0, 51.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_gap_shrinks_inward() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0).gap(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect, Rect::new(1.0, 3.0, 97.0, 43.0));
    }

    #[test]
    fn test_includes_point_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.includes_point(Point::new(10.0, 10.0)));
        assert!(rect.includes_point(Point::new(0.0, 5.0)));
        assert!(!rect.includes_point(Point::new(10.1, 5.0)));
    }

    #[test]
    fn test_delta_from_rects() {
        let basis = Rect::new(100.0, 100.0, 200.0, 200.0);
        // left edge dragged 10px outward, bottom edge 20px outward
        let target = Rect::new(90.0, 100.0, 210.0, 220.0);
        let delta = RectDelta::from_rects(&basis, &target);
        assert_eq!(delta, RectDelta::new(0.0, 10.0, 20.0, 0.0));
    }

    #[test]
    fn test_delta_from_identical_rects_is_zero() {
        let r = Rect::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(RectDelta::from_rects(&r, &r), RectDelta::default());
    }

    #[test]
    fn test_overlap() {
        assert_eq!(overlap(0.0, 10.0, 5.0, 20.0), 5.0);
        assert_eq!(overlap(0.0, 10.0, 10.0, 20.0), 0.0);
        assert_eq!(overlap(0.0, 10.0, 12.0, 20.0), 0.0);
    }
}
