//! Geometric primitives for incremental layout.
//!
//! This module provides the value types every layout step works with.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate, relative to the owning container unless stated otherwise
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Relayout uses the screen coordinate system used by diagram clients:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! A node's position is the top-left corner of its bounding box, expressed in
//! its direct parent's frame.
//!
//! # Unset values
//!
//! Elements that have never been laid out carry the sentinel
//! [`Point::UNSET`] / [`Size::UNSET`] (`-1, -1`). Use [`Point::is_unset`] and
//! [`Size::is_unset`] to tell "not yet computed" apart from a real zero.

use serde::{Deserialize, Serialize};

/// Sentinel coordinate used for values that have not been computed yet.
const UNSET_VALUE: f64 = -1.0;

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use relayout_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// The "not yet positioned" sentinel.
    pub const UNSET: Point = Point {
        x: UNSET_VALUE,
        y: UNSET_VALUE,
    };

    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
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

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Returns true if this point is the [`Point::UNSET`] sentinel
    pub fn is_unset(self) -> bool {
        self.x == UNSET_VALUE && self.y == UNSET_VALUE
    }

    /// Adds another point to this point, returning a new point.
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

    /// Treats this point as a top-left corner and returns the bounds of a
    /// box of the given size.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// The "not yet sized" sentinel.
    pub const UNSET: Size = Size {
        width: UNSET_VALUE,
        height: UNSET_VALUE,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns true if this size is the [`Size::UNSET`] sentinel
    pub fn is_unset(self) -> bool {
        self.width == UNSET_VALUE && self.height == UNSET_VALUE
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Grows both dimensions by the given amounts
    pub fn grow(self, dw: f64, dh: f64) -> Self {
        Self {
            width: self.width + dw,
            height: self.height + dh,
        }
    }

    /// Returns the offset from a box's top-left corner to its center
    pub fn half(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns true if the interiors of both bounds overlap.
    ///
    /// Bounds that only share an edge or a corner do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relayout_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    /// let b = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
    /// let c = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
    ///
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f64..1000.0,
            -1000.0f64..1000.0,
            1.0f64..500.0,
            1.0f64..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (1.0f64..500.0, 1.0f64..500.0).prop_map(|(w, h)| Size::new(w, h))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Intersection should be symmetric.
    fn check_intersects_is_symmetric(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(b1.intersects(&b2), b2.intersects(&b1));
        Ok(())
    }

    /// A box stacked directly below another never intersects it.
    fn check_stacked_bounds_do_not_intersect(
        b1: Bounds,
        x: f64,
        size: Size,
    ) -> Result<(), TestCaseError> {
        let below = Point::new(x, b1.max_y()).to_bounds(size);
        prop_assert!(!b1.intersects(&below));
        prop_assert!(!below.intersects(&b1));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn intersects_is_symmetric(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_intersects_is_symmetric(b1, b2)?;
        }

        #[test]
        fn stacked_bounds_do_not_intersect(
            b1 in bounds_strategy(),
            x in -1000.0f64..1000.0,
            size in size_strategy(),
        ) {
            check_stacked_bounds_do_not_intersect(b1, x, size)?;
        }
    }
}
