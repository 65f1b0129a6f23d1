//! Geometric primitives for diagram layout and positioning.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Coordinates follow the screen convention used by pointer events:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Node positions are centers; a node's [`Bounds`] extend half its [`Size`]
//! in each direction.

use serde::Deserialize;

/// A 2D point in diagram coordinate space.
///
/// Also used as a displacement vector (pointer deltas, drag offsets).
///
/// # Examples
///
/// ```
/// # use reportgraph_core::geometry::Point;
/// let anchor = Point::new(200.0, 200.0);
/// let moved = anchor.add_point(Point::new(30.0, -10.0));
/// assert_eq!(moved, Point::new(230.0, 190.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Converts a center point and size into a bounds rectangle
    pub fn to_bounds(self, size: Size) -> Bounds {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;

        Bounds {
            min_x: self.x - half_width,
            min_y: self.y - half_height,
            max_x: self.x + half_width,
            max_y: self.y + half_height,
        }
    }
}

/// Width and height of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Merges two bounds to create a larger bounds that contains both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds outward by `insets` on each side.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left,
            min_y: self.min_y - insets.top,
            max_x: self.max_x + insets.right,
            max_y: self.max_y + insets.bottom,
        }
    }
}

/// Spacing around an element with potentially different values per side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Checks that no side is negative or non-finite
    pub fn is_valid(self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|side| side.is_finite() && *side >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_accessors() {
        let point = Point::new(3.5, 4.25);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.25);
        assert!(Point::default().is_zero());
        assert!(!point.is_zero());
    }

    #[test]
    fn test_point_add_and_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);

        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_point_with_coordinates() {
        let point = Point::new(1.0, 2.0).with_x(10.0).with_y(20.0);
        assert_eq!(point, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_point_midpoint() {
        let mid = Point::new(0.0, 0.0).midpoint(Point::new(4.0, 6.0));
        assert_eq!(mid, Point::new(2.0, 3.0));
    }

    #[test]
    fn test_point_to_bounds() {
        let bounds = Point::new(10.0, 20.0).to_bounds(Size::new(6.0, 8.0));

        assert_eq!(bounds.min_x(), 7.0); // 10 - 3
        assert_eq!(bounds.min_y(), 16.0); // 20 - 4
        assert_eq!(bounds.max_x(), 13.0); // 10 + 3
        assert_eq!(bounds.max_y(), 24.0); // 20 + 4
        assert_eq!(bounds.width(), 6.0);
        assert_eq!(bounds.height(), 8.0);
    }

    #[test]
    fn test_bounds_merge() {
        let a = Point::new(3.0, 4.0).to_bounds(Size::new(4.0, 4.0));
        let b = Point::new(5.5, 2.0).to_bounds(Size::new(5.0, 4.0));

        let merged = a.merge(&b);
        assert_eq!(merged.min_x(), 1.0);
        assert_eq!(merged.min_y(), 0.0);
        assert_eq!(merged.max_x(), 8.0);
        assert_eq!(merged.max_y(), 6.0);
    }

    #[test]
    fn test_bounds_add_padding() {
        let bounds = Point::new(4.0, 5.5).to_bounds(Size::new(4.0, 5.0));
        let padded = bounds.add_padding(Insets::uniform(2.0));

        assert_eq!(padded.min_x(), 0.0); // 2 - 2
        assert_eq!(padded.min_y(), 1.0); // 3 - 2
        assert_eq!(padded.max_x(), 8.0); // 6 + 2
        assert_eq!(padded.max_y(), 10.0); // 8 + 2
    }

    #[test]
    fn test_insets_validity() {
        assert!(Insets::uniform(30.0).is_valid());
        assert!(Insets::default().is_valid());
        assert!(!Insets::uniform(-1.0).is_valid());
        assert!(!Insets::uniform(f32::NAN).is_valid());
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..500.0, 0.0f32..500.0).prop_map(|(w, h)| Size::new(w, h))
    }

    proptest! {
        /// Adding then subtracting a delta returns the original point.
        #[test]
        fn add_sub_roundtrip(p in point_strategy(), delta in point_strategy()) {
            let back = p.add_point(delta).sub_point(delta);
            prop_assert!(approx_eq!(f32, back.x(), p.x(), epsilon = 0.001));
            prop_assert!(approx_eq!(f32, back.y(), p.y(), epsilon = 0.001));
        }

        /// The midpoint lies between both points on each axis.
        #[test]
        fn midpoint_between(a in point_strategy(), b in point_strategy()) {
            let mid = a.midpoint(b);
            prop_assert!(mid.x() >= a.x().min(b.x()) && mid.x() <= a.x().max(b.x()));
            prop_assert!(mid.y() >= a.y().min(b.y()) && mid.y() <= a.y().max(b.y()));
        }

        /// Merged bounds enclose both inputs.
        #[test]
        fn merge_encloses_both(a in point_strategy(), b in point_strategy(), size in size_strategy()) {
            let (first, second) = (a.to_bounds(size), b.to_bounds(size));
            let merged = first.merge(&second);
            for bounds in [first, second] {
                prop_assert!(merged.min_x() <= bounds.min_x() && merged.max_x() >= bounds.max_x());
                prop_assert!(merged.min_y() <= bounds.min_y() && merged.max_y() >= bounds.max_y());
            }
        }
    }
}
