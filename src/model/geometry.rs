//! Screen-space geometry.
//!
//! All coordinates are absolute screen pixels with the origin at the
//! top-left of the primary screen and `y` growing downwards. Backends whose
//! native space differs (AppKit) convert at the edge.

/// A point on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// This point shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: i32) -> Self {
        Self::new(side, side)
    }
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    /// Horizontal segment of `length` centred on `center`.
    ///
    /// The half length is truncated, so odd lengths lose their last pixel.
    pub fn horizontal(center: Point, length: i32) -> Self {
        let half = length / 2;
        Self {
            start: Point::new(center.x - half, center.y),
            end: Point::new(center.x + half, center.y),
        }
    }

    /// The same segment seen from a window whose top-left is `origin`.
    pub fn relative_to(&self, origin: Point) -> Self {
        Self {
            start: self.start.offset(-origin.x, -origin.y),
            end: self.end.offset(-origin.x, -origin.y),
        }
    }
}
