//! Geometric primitives for diagram layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in layout space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned bounding box
//!
//! # Coordinate System
//!
//! Layout space is y-up, like a mathematical plot:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! The SVG exporter flips the y-axis when rendering, so a node with a
//! larger `y` appears higher on the page.

/// A 2D point in layout space.
///
/// # Examples
///
/// ```
/// # use lisvg_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(30.0, 40.0);
///
/// let mid = a.midpoint(b);
/// assert_eq!(mid.x(), 20.0);
/// assert_eq!(mid.y(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Returns the arithmetic midpoint between two points.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Creates a [`Bounds`] of the given size centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }
}

/// An axis-aligned bounding box.
///
/// # Examples
///
/// ```
/// # use lisvg_core::geometry::{Bounds, Point, Size};
/// let a = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
/// let b = Bounds::new_from_center(Point::new(20.0, 0.0), Size::new(10.0, 10.0));
///
/// let merged = a.merge(&b);
/// assert_eq!(merged.min_x(), -5.0);
/// assert_eq!(merged.max_x(), 25.0);
/// assert_eq!(merged.width(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds of `size` centered on `center`.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn min_x(self) -> f64 {
        self.min_x
    }

    pub fn min_y(self) -> f64 {
        self.min_y
    }

    pub fn max_x(self) -> f64 {
        self.max_x
    }

    pub fn max_y(self) -> f64 {
        self.max_y
    }

    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the minimum corner.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the smallest bounds containing both `self` and `other`.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `padding` on every side.
    pub fn add_padding(&self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_midpoint() {
        let mid = Point::new(-10.0, 4.0).midpoint(Point::new(10.0, 8.0));
        assert_eq!(mid, Point::new(0.0, 6.0));
    }

    #[test]
    fn test_point_add() {
        let p = Point::new(1.5, 2.5).add_point(Point::new(0.5, -2.5));
        assert_eq!(p, Point::new(2.0, 0.0));
    }

    #[test]
    fn test_bounds_from_center() {
        let bounds = Point::new(50.0, 25.0).to_bounds(Size::new(100.0, 50.0));

        assert_eq!(bounds.min_point(), Point::new(0.0, 0.0));
        assert_eq!(bounds.max_x(), 100.0);
        assert_eq!(bounds.max_y(), 50.0);
        assert_eq!((bounds.width(), bounds.height()), (100.0, 50.0));
    }

    #[test]
    fn test_bounds_add_padding() {
        let bounds = Bounds::new_from_center(Point::default(), Size::new(10.0, 20.0)).add_padding(5.0);

        assert!(approx_eq!(f64, bounds.width(), 20.0, ulps = 2));
        assert!(approx_eq!(f64, bounds.height(), 30.0, ulps = 2));
        assert!(approx_eq!(f64, bounds.min_x(), -10.0, ulps = 2));
    }

    proptest! {
        #[test]
        fn merge_contains_both(
            ax in -1000.0f64..1000.0, ay in -1000.0f64..1000.0,
            bx in -1000.0f64..1000.0, by in -1000.0f64..1000.0,
            w in 0.0f64..500.0, h in 0.0f64..500.0,
        ) {
            let a = Bounds::new_from_center(Point::new(ax, ay), Size::new(w, h));
            let b = Bounds::new_from_center(Point::new(bx, by), Size::new(h, w));
            let merged = a.merge(&b);

            prop_assert!(merged.min_x() <= a.min_x() && merged.min_x() <= b.min_x());
            prop_assert!(merged.max_y() >= a.max_y() && merged.max_y() >= b.max_y());
            prop_assert!(merged.width() >= a.width().max(b.width()) - 1e-9);
        }
    }
}
