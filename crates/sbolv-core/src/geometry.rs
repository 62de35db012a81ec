//! Geometric primitives for glyph placement and bounds tracking.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in world space
//! - [`Bounds`] - An axis-aligned bounding box defined by its min and max corners
//! - [`Insets`] - Padding values for four sides
//! - [`find_bound_of_bounds`] - Union of a list of bounding boxes
//!
//! # Coordinate System
//!
//! World space follows the plotting convention, not the SVG one:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! Glyph templates are authored top-down and are flipped into this space by
//! the transform pipeline. Exporters that target y-down surfaces flip back.

use kurbo::Vec2;

/// A 2D point in world coordinate space.
///
/// # Examples
///
/// ```
/// # use sbolv_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
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

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Moves the point `distance` units along the direction `angle` (radians,
    /// counter-clockwise from +X).
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbolv_core::geometry::Point;
    /// let moved = Point::new(1.0, 1.0).advance(2.0, 0.0);
    /// assert_eq!(moved, Point::new(3.0, 1.0));
    /// ```
    pub fn advance(self, distance: f64, angle: f64) -> Self {
        let offset = Vec2::from_angle(angle) * distance;
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }
}

impl From<kurbo::Point> for Point {
    fn from(point: kurbo::Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Point> for kurbo::Point {
    fn from(point: Point) -> Self {
        kurbo::Point::new(point.x, point.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned bounding box with minimum and maximum corners
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from two corners.
    ///
    /// The corners are normalized, so passing them in either order yields the
    /// same box.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates degenerate bounds covering a single point
    pub fn from_point(point: Point) -> Self {
        Self::new(point, point)
    }

    /// Returns the coordinate-wise min/max over all points, or `None` for an
    /// empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbolv_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([
    ///     Point::new(1.0, 5.0),
    ///     Point::new(-2.0, 3.0),
    ///     Point::new(4.0, -1.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(bounds.min_point(), Point::new(-2.0, -1.0));
    /// assert_eq!(bounds.max_point(), Point::new(4.0, 5.0));
    /// ```
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        points
            .into_iter()
            .map(Self::from_point)
            .reduce(|acc, b| acc.merge(&b))
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

    /// Returns the lower-left corner
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the upper-right corner
    pub fn max_point(self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns true if the point lies inside or on the edge of the bounds
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbolv_core::geometry::{Bounds, Point};
    /// let a = Bounds::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
    /// let b = Bounds::new(Point::new(5.0, 6.0), Point::new(7.0, 8.0));
    ///
    /// let combined = a.merge(&b);
    /// assert_eq!(combined.min_point(), Point::new(1.0, 2.0));
    /// assert_eq!(combined.max_point(), Point::new(7.0, 8.0));
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Expands the bounds by adding insets.
    ///
    /// Left and bottom insets lower the minimum corner, right and top insets
    /// raise the maximum corner (world space is y-up).
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.bottom(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.top(),
        }
    }
}

/// Returns the union of a list of bounding boxes, or `None` if the list is
/// empty.
///
/// # Examples
///
/// ```
/// # use sbolv_core::geometry::{find_bound_of_bounds, Bounds, Point};
/// let union = find_bound_of_bounds(&[
///     Bounds::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0)),
///     Bounds::new(Point::new(5.0, 6.0), Point::new(7.0, 8.0)),
/// ])
/// .unwrap();
/// assert_eq!(union.min_point(), Point::new(1.0, 2.0));
/// assert_eq!(union.max_point(), Point::new(7.0, 8.0));
/// ```
pub fn find_bound_of_bounds(bounds: &[Bounds]) -> Option<Bounds> {
    bounds.iter().copied().reduce(|acc, b| acc.merge(&b))
}

/// Represents spacing around a box with potentially different values for
/// each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f64 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f64 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f64 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f64 {
        self.left
    }
}
