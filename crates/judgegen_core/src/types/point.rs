//! Lattice point type.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Largest absolute coordinate accepted by the geometric predicates.
///
/// Keeps every cross product of coordinate differences inside `i64`.
pub const MAX_COORDINATE: i64 = 0x3FFF_FFFF;

/// A point (or direction vector) on the integer lattice.
///
/// Ordering is lexicographic by `(x, y)`, which is the order the monotone
/// chain hull sorts by.
///
/// # Examples
///
/// ```
/// use judgegen_core::types::Point;
///
/// let a = Point::new(1, 2);
/// let b: Point = (3, 4).into();
/// assert_eq!(b - a, Point::new(2, 2));
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i64,
    /// Vertical coordinate.
    pub y: i64,
}

impl Point {
    /// Creates a point from its coordinates.
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ORIGIN: Point = Point::new(0, 0);

    /// Whether both coordinates lie within [`MAX_COORDINATE`] in absolute value.
    #[inline]
    pub fn in_bounds(&self) -> bool {
        self.x.abs() <= MAX_COORDINATE && self.y.abs() <= MAX_COORDINATE
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for (i64, i64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    /// Formats as `x y`, the layout test files use.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}
