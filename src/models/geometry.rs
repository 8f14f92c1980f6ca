//! Pixel-space and display-space geometry shared by the gesture layer.

use serde::{Deserialize, Serialize};

/// A 2D point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn minus(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// A point in the secondary 3D display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    pub fn top_left(self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn center(self) -> Point {
        Point::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Edge-touching rectangles count as overlapping.
    pub fn overlaps(self, other: Rect) -> bool {
        !(self.right() < other.left
            || self.left > other.right()
            || self.bottom() < other.top
            || self.top > other.bottom())
    }

    pub fn moved_to(self, top_left: Point) -> Rect {
        Rect {
            top: top_left.y,
            left: top_left.x,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_includes_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(a.overlaps(b));
        assert!(b.overlaps(a));
    }

    #[test]
    fn disjoint_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.5, 0.0, 5.0, 5.0);
        assert!(!a.overlaps(b));
        let c = Rect::new(0.0, 11.0, 5.0, 5.0);
        assert!(!a.overlaps(c));
    }

    #[test]
    fn center_and_move_keep_size() {
        let rect = Rect::new(100.0, 50.0, 40.0, 20.0);
        assert_eq!(rect.center(), Point::new(120.0, 60.0));
        let moved = rect.moved_to(Point::new(0.0, 0.0));
        assert_eq!(moved.width, 40.0);
        assert_eq!(moved.height, 20.0);
        assert_eq!(moved.top_left(), Point::new(0.0, 0.0));
    }
}
