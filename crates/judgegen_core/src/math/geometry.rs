//! Lattice geometry primitives and polygon oracles.
//!
//! This module provides:
//! - [`cross`], [`cross3`], [`dot`], [`dot3`]: exact integer vector products
//! - [`orientation`]: overflow-free turn test for arbitrary `i64` points
//! - [`cyclic_sort`]: angular ordering of direction vectors
//! - [`convex_hull`]: Andrew's monotone chain
//! - [`is_convex`], [`is_strictly_convex`], [`is_simple`], [`is_ccw`]: oracles
//!   used to check generated polygons
//!
//! Polygons are slices of [`Point`] that are implicitly closed: the last
//! vertex connects back to the first.
//!
//! The oracles reject coordinates beyond [`MAX_COORDINATE`], which is the
//! range in which every product below fits in `i64`.

use std::cmp::Ordering;

use crate::types::error::SamplingError;
use crate::types::{Point, MAX_COORDINATE};

/// Cross product `a x b`.
///
/// Exact while coordinates stay within [`MAX_COORDINATE`]; use
/// [`orientation`] for arbitrary `i64` points.
#[inline]
pub fn cross(a: Point, b: Point) -> i64 {
    a.x * b.y - a.y * b.x
}

/// Cross product of `a - p` and `b - p`.
///
/// Positive when `p -> a -> b` turns left, negative for a right turn, zero
/// when the three points are collinear.
#[inline]
pub fn cross3(p: Point, a: Point, b: Point) -> i64 {
    cross(a - p, b - p)
}

/// Signed product `u * v` of two coordinate differences as
/// `(negative, magnitude)`.
///
/// Differences of `i64` values are below `2^64` in magnitude, so the product
/// always fits in `u128`.
fn wide_product(u: i128, v: i128) -> (bool, u128) {
    let magnitude = u.unsigned_abs() * v.unsigned_abs();
    ((u < 0) != (v < 0) && magnitude != 0, magnitude)
}

fn wide_cmp(a: (bool, u128), b: (bool, u128)) -> Ordering {
    match (a.0, b.0) {
        (false, false) => a.1.cmp(&b.1),
        (true, true) => b.1.cmp(&a.1),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
    }
}

/// Sign of [`cross3`]`(p, a, b)`, exact for every `i64` coordinate.
///
/// `Greater` is a left turn, `Less` a right turn and `Equal` means the three
/// points are collinear.
pub fn orientation(p: Point, a: Point, b: Point) -> Ordering {
    let (ax, ay) = (a.x as i128 - p.x as i128, a.y as i128 - p.y as i128);
    let (bx, by) = (b.x as i128 - p.x as i128, b.y as i128 - p.y as i128);
    wide_cmp(wide_product(ax, by), wide_product(ay, bx))
}

/// Dot product `a . b`.
#[inline]
pub fn dot(a: Point, b: Point) -> i64 {
    a.x * b.x + a.y * b.y
}

/// Dot product of `a - p` and `b - p`.
#[inline]
pub fn dot3(p: Point, a: Point, b: Point) -> i64 {
    dot(a - p, b - p)
}

/// Whether a direction lies in the half-plane of angles `(90°, 270°]`.
#[inline]
fn left_half(p: Point) -> bool {
    if p.x == 0 {
        p.y < 0
    } else {
        p.x < 0
    }
}

/// Angular comparison of two non-zero direction vectors.
///
/// Directions in the left half-plane come first; within a half-plane `a`
/// precedes `b` when `b` is counter-clockwise of `a`. Parallel directions
/// compare equal.
pub fn angle_cmp(a: Point, b: Point) -> Ordering {
    match (left_half(a), left_half(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => 0.cmp(&cross(a, b)),
    }
}

/// Sorts non-zero direction vectors by angle (see [`angle_cmp`]).
///
/// Walking the sorted vectors head to tail traces a counter-clockwise convex
/// polygon when they sum to zero. The sort is stable.
pub fn cyclic_sort(dirs: &mut [Point]) {
    dirs.sort_by(|&a, &b| angle_cmp(a, b));
}

/// Convex hull by Andrew's monotone chain.
///
/// Points are sorted by `(x, y)` and deduplicated; a vertex is dropped
/// whenever it does not make a strict left turn, so collinear boundary points
/// are not part of the result. The hull is returned counter-clockwise
/// starting from the lowest-leftmost point, without repeating it at the end.
/// Fewer than three distinct points are returned unchanged (sorted).
/// Turns are decided by [`orientation`], so any `i64` coordinates are
/// accepted.
///
/// # Examples
///
/// ```
/// use judgegen_core::math::geometry::convex_hull;
/// use judgegen_core::types::Point;
///
/// let points: Vec<Point> = vec![(0, 0), (2, 0), (1, 1), (2, 2), (0, 2), (1, 0)]
///     .into_iter()
///     .map(Point::from)
///     .collect();
/// let hull = convex_hull(&points);
/// assert_eq!(hull, vec![(0, 0).into(), (2, 0).into(), (2, 2).into(), (0, 2).into()]);
/// ```
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut p = points.to_vec();
    p.sort();
    p.dedup();
    if p.len() < 3 {
        return p;
    }

    let mut h: Vec<Point> = Vec::with_capacity(2 * p.len());
    for &q in p.iter() {
        while h.len() > 1 && orientation(h[h.len() - 2], h[h.len() - 1], q) != Ordering::Greater {
            h.pop();
        }
        h.push(q);
    }
    let lower_len = h.len();
    for &q in p.iter().rev().skip(1) {
        while h.len() > lower_len && orientation(h[h.len() - 2], h[h.len() - 1], q) != Ordering::Greater {
            h.pop();
        }
        h.push(q);
    }
    // the upper chain ends where the lower chain started
    h.pop();
    h
}

fn check_bounds(operation: &'static str, polygon: &[Point]) -> Result<(), SamplingError> {
    if polygon.iter().all(Point::in_bounds) {
        Ok(())
    } else {
        Err(SamplingError::invalid_argument(
            operation,
            format!("coordinates must be within +-{}", MAX_COORDINATE),
        ))
    }
}

/// Unit direction of the edge `a -> b`, or the raw (zero) vector when the
/// endpoints coincide.
fn unit_direction(a: Point, b: Point) -> (f64, f64) {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    if a == b {
        return (dx, dy);
    }
    let len = libm::hypot(dx, dy);
    (dx / len, dy / len)
}

/// Whether the polygon is convex and counter-clockwise.
///
/// Collinear vertices are allowed, repeated consecutive vertices are not, the
/// polygon must have positive area, and its boundary must wind around exactly
/// once. Fewer than three vertices are never convex.
///
/// # Errors
///
/// `InvalidArgument` if a coordinate exceeds [`MAX_COORDINATE`].
pub fn is_convex(polygon: &[Point]) -> Result<bool, SamplingError> {
    check_bounds("is_convex", polygon)?;
    let n = polygon.len();
    if n < 3 {
        return Ok(false);
    }
    let at = |i: usize| polygon[i % n];

    let mut has_area = false;
    let mut winding = 0.0_f64;
    for i in 0..n {
        if at(i) == at(i + 1) {
            return Ok(false);
        }
        let ccw = cross3(at(i), at(i + 1), at(i + 2));
        if ccw < 0 {
            return Ok(false);
        }
        has_area |= ccw > 0;
        let (ax, ay) = unit_direction(at(i), at(i + 1));
        let (bx, by) = unit_direction(at(i + 1), at(i + 2));
        winding += libm::acos((ax * bx + ay * by).clamp(-1.0, 1.0));
    }
    if winding.is_nan() {
        return Err(SamplingError::domain(
            "is_convex",
            "float error while calculating the winding number",
        ));
    }
    // one full turn is 2*pi, two turns would exceed 4*pi
    Ok(has_area && winding < 9.0)
}

/// Whether the polygon is convex with no three consecutive vertices
/// collinear.
///
/// # Errors
///
/// `InvalidArgument` if a coordinate exceeds [`MAX_COORDINATE`].
pub fn is_strictly_convex(polygon: &[Point]) -> Result<bool, SamplingError> {
    if !is_convex(polygon)? {
        return Ok(false);
    }
    let n = polygon.len();
    Ok((0..n).all(|i| cross3(polygon[i], polygon[(i + 1) % n], polygon[(i + 2) % n]) != 0))
}

/// Whether the closed segments `a-b` and `c-d` share at least one point.
fn segments_touch(a: Point, b: Point, c: Point, d: Point) -> bool {
    let o1 = cross3(a, b, c).signum();
    let o2 = cross3(a, b, d).signum();
    let o3 = cross3(c, d, a).signum();
    let o4 = cross3(c, d, b).signum();
    if o1 * o2 > 0 || o3 * o4 > 0 {
        return false;
    }
    if o1 == 0 && o2 == 0 {
        // collinear: compare the projections on both axes
        let overlap = |p: i64, q: i64, r: i64, s: i64| p.min(q) <= r.max(s) && r.min(s) <= p.max(q);
        return overlap(a.x, b.x, c.x, d.x) && overlap(a.y, b.y, c.y, d.y);
    }
    true
}

/// Whether the polygon is simple: no edge touches a non-adjacent edge and
/// adjacent edges meet only at their shared vertex.
///
/// Runs in O(n²) time over all edge pairs. Fewer than three vertices are
/// never simple.
///
/// # Errors
///
/// `InvalidArgument` if a coordinate exceeds [`MAX_COORDINATE`].
///
/// # Examples
///
/// ```
/// use judgegen_core::math::geometry::is_simple;
/// use judgegen_core::types::Point;
///
/// let square: Vec<Point> = vec![(0, 0), (1, 0), (1, 1), (0, 1)].into_iter().map(Point::from).collect();
/// let bowtie: Vec<Point> = vec![(0, 0), (1, 0), (0, 1), (1, 1)].into_iter().map(Point::from).collect();
/// assert!(is_simple(&square).unwrap());
/// assert!(!is_simple(&bowtie).unwrap());
/// ```
pub fn is_simple(polygon: &[Point]) -> Result<bool, SamplingError> {
    check_bounds("is_simple", polygon)?;
    let n = polygon.len();
    if n < 3 {
        return Ok(false);
    }
    let edge = |i: usize| (polygon[i], polygon[(i + 1) % n]);

    for i in 0..n {
        let (a, b) = edge(i);
        if a == b {
            return Ok(false);
        }
        // the edge following i shares vertex b: it must not fold back onto a-b
        let c = polygon[(i + 2) % n];
        if cross3(a, b, c) == 0 && dot(b - a, c - b) < 0 {
            return Ok(false);
        }
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = edge(j);
            if segments_touch(a, b, c, d) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Whether the polygon has positive signed area (counter-clockwise).
///
/// # Errors
///
/// `InvalidArgument` if a coordinate exceeds [`MAX_COORDINATE`].
pub fn is_ccw(polygon: &[Point]) -> Result<bool, SamplingError> {
    check_bounds("is_ccw", polygon)?;
    let n = polygon.len();
    if n < 2 {
        return Ok(false);
    }
    let mut area: i128 = cross(polygon[n - 1], polygon[0]) as i128;
    for i in 1..n {
        area += cross(polygon[i - 1], polygon[i]) as i128;
    }
    Ok(area > 0)
}
