//! Random geometric structures on the integer lattice.

use judgegen_core::math::geometry::{cross, cross3, cyclic_sort, dot, dot3};
use judgegen_core::math::number_theory::apply_mod;
use judgegen_core::types::error::ensure;
use judgegen_core::types::{Point, SamplingError, MAX_COORDINATE};
use rand_core::RngCore;
use tracing::{debug, trace};

use crate::sampler::Sampler;

/// Largest `dim` accepted by [`Sampler::non_collinear_points`].
const MAX_NON_COLLINEAR_DIM: i64 = 0x1FFF_FFFF;

impl<E: RngCore> Sampler<E> {
    /// Uniform lattice point with both coordinates in `(-dim, dim)`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `1 <= dim <= 2^30 - 1`.
    pub fn random_point(&mut self, dim: i64) -> Result<Point, SamplingError> {
        ensure(
            (1..=MAX_COORDINATE).contains(&dim),
            "random_point",
            "dim must be in [1, 2^30)",
        )?;
        let x = self.integer(-dim + 1, dim)?;
        let y = self.integer(-dim + 1, dim)?;
        Ok(Point::new(x, y))
    }

    /// Random convex polygon with `n` vertices in counter-clockwise order.
    ///
    /// Coordinates satisfy `|x| < dim_x` and `|y| < dim_y`, and the maximum
    /// coordinates equal `dim - 1`. Consecutive edges may be collinear, but
    /// the polygon always has positive area.
    ///
    /// The edge vectors are built from random partitions of the horizontal
    /// and vertical extents, split into a negative and a positive run, then
    /// sorted by angle and walked.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` unless `2 <= dim_x, dim_y <= 2^30 - 1` and
    ///   `3 <= n <= 4 * (dim_x + dim_y) - 8`
    /// - `RetryBudgetExhausted` if no attempt succeeds within
    ///   `SamplerConfig::max_polygon_attempts`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use judgegen_core::math::geometry::is_convex;
    /// use judgegen_sampling::Sampler;
    ///
    /// let mut sampler = Sampler::new(5);
    /// let polygon = sampler.convex_polygon(20, 100, 100).unwrap();
    /// assert_eq!(polygon.len(), 20);
    /// assert!(is_convex(&polygon).unwrap());
    /// ```
    pub fn convex_polygon(&mut self, n: i64, dim_x: i64, dim_y: i64) -> Result<Vec<Point>, SamplingError> {
        const OP: &str = "convex_polygon";
        ensure(dim_x <= MAX_COORDINATE, OP, "dim_x too large")?;
        ensure(dim_y <= MAX_COORDINATE, OP, "dim_y too large")?;
        ensure(dim_x >= 2, OP, "dim_x must be at least 2")?;
        ensure(dim_y >= 2, OP, "dim_y must be at least 2")?;
        ensure(n <= 4 * (dim_x + dim_y) - 8, OP, "dim_x + dim_y too small for n")?;
        ensure(n >= 3, OP, "n too small")?;

        let attempts = self.config().max_polygon_attempts;
        for attempt in 0..attempts {
            let left = 1 + self.binomial(n - 2, 0.5)?;
            let down = 1 + self.binomial(n - 2, 0.5)?;
            let mut xs = self.signed_steps(2 * dim_x - 2, left, n - left)?;
            let mut ys = self.signed_steps(2 * dim_y - 2, down, n - down)?;

            // zero steps of x first, zero steps of y last
            xs.sort_by_key(|&z| z != 0);
            ys.sort_by_key(|&z| z == 0);
            let zeros_x = xs.iter().filter(|&&z| z == 0).count();
            let zeros_y = ys.iter().filter(|&&z| z == 0).count();
            if zeros_x + zeros_y > xs.len() {
                trace!(attempt, zeros_x, zeros_y, "convex polygon has a null edge, retrying");
                continue;
            }
            self.shuffle(&mut xs[zeros_x..]);
            if zeros_x > 0 {
                let non_zero_y = ys.len() - zeros_y;
                self.shuffle(&mut ys[..non_zero_y]);
            }

            let mut dirs: Vec<Point> = xs.iter().zip(&ys).map(|(&x, &y)| Point::new(x, y)).collect();
            cyclic_sort(&mut dirs);
            let turns = (0..dirs.len()).any(|i| cross(dirs[i], dirs[(i + 1) % dirs.len()]) != 0);
            if !turns {
                trace!(attempt, "convex polygon edges all parallel, retrying");
                continue;
            }

            let mut res = Vec::with_capacity(dirs.len() + 1);
            let mut current = Point::ORIGIN;
            let mut max = Point::ORIGIN;
            res.push(current);
            for dir in dirs {
                current = current + dir;
                max.x = max.x.max(current.x);
                max.y = max.y.max(current.y);
                res.push(current);
            }
            res.pop();

            let shift = Point::new(dim_x - 1 - max.x, dim_y - 1 - max.y);
            for point in res.iter_mut() {
                *point = *point + shift;
            }
            self.rotate(&mut res)?;
            return Ok(res);
        }
        debug!(operation = OP, attempts, "polygon attempts exhausted");
        Err(SamplingError::RetryBudgetExhausted {
            operation: OP,
            attempts,
        })
    }

    /// Negated partition of `total` into `negative` parts followed by a
    /// partition of `total` into `positive` parts; zero parts allowed.
    fn signed_steps(&mut self, total: i64, negative: i64, positive: i64) -> Result<Vec<i64>, SamplingError> {
        let mut steps: Vec<i64> = self.partition(total, negative, 0)?.into_iter().map(|z| -z).collect();
        steps.extend(self.partition(total, positive, 0)?);
        Ok(steps)
    }

    /// Random simple polygon with `n` distinct vertices in `(-dim, dim)^2`.
    ///
    /// The vertices are ordered along a random direction; the two lowest
    /// become the endpoints of a chain through all others, which is
    /// untangled by repeatedly splitting index ranges along a random
    /// separating line. Orientation is arbitrary.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` unless `n >= 3`, `1 <= dim <= 2^30 - 1` and
    ///   `n * sqrt(n) <= dim`
    /// - `RetryBudgetExhausted` if every attempt draws a degenerate point set
    ///
    /// # Examples
    ///
    /// ```rust
    /// use judgegen_core::math::geometry::is_simple;
    /// use judgegen_sampling::Sampler;
    ///
    /// let mut sampler = Sampler::new(6);
    /// let polygon = sampler.simple_polygon(30, 1_000).unwrap();
    /// assert!(is_simple(&polygon).unwrap());
    /// ```
    pub fn simple_polygon(&mut self, n: i64, dim: i64) -> Result<Vec<Point>, SamplingError> {
        const OP: &str = "simple_polygon";
        ensure(dim <= MAX_COORDINATE, OP, "dim too large")?;
        ensure(dim > 0, OP, "dim must be positive")?;
        ensure(n >= 3, OP, "n too small")?;
        let nf = n as f64;
        ensure(nf * libm::sqrt(nf) <= dim as f64, OP, "dim too small for n")?;

        let side = 2 * dim - 1;
        let attempts = self.config().max_polygon_attempts;
        for attempt in 0..attempts {
            let cells = self.distinct(n, 0, side * side)?;
            let mut points: Vec<Point> = cells
                .into_iter()
                .map(|cell| Point::new(cell / side - dim + 1, cell % side - dim + 1))
                .collect();

            let dir = self.random_point(MAX_COORDINATE)?;
            points.sort_by_key(|&p| dot(p, dir));
            if !Self::separated_endpoints(&points, dir) {
                trace!(attempt, "simple polygon endpoints not separated, retrying");
                continue;
            }
            let last = points.len() - 1;
            points.swap(1, last);

            if self.untangle(&mut points)? {
                return Ok(points);
            }
            trace!(attempt, "simple polygon chain degenerate, retrying");
        }
        debug!(operation = OP, attempts, "polygon attempts exhausted");
        Err(SamplingError::RetryBudgetExhausted {
            operation: OP,
            attempts,
        })
    }

    /// Whether the two lowest points along `dir` are strictly below all
    /// others and no other point lies on the line through them, so the
    /// closing edge between them cannot touch the chain.
    fn separated_endpoints(points: &[Point], dir: Point) -> bool {
        let (f, l) = (points[0], points[1]);
        dot(f, dir) < dot(l, dir)
            && dot(l, dir) < dot(points[2], dir)
            && points[2..].iter().all(|&p| cross3(p, f, l) != 0)
    }

    /// Reorders `points` into a simple chain from `points[0]` to the last
    /// point.
    ///
    /// A range `[start, end)` with endpoints `f` and `l` is split at a random
    /// interior vertex `a` not on line `fl`, along a line `ab` that separates
    /// `f` from `l`. Interior points go to the side of `f` or of `l`; points
    /// on the line go to `l`'s side when they lie on the ray from `a`
    /// through `l` (or through `b` when `l` is off the line). Both halves
    /// then meet only in `a`. Ranges are processed depth first, left half
    /// first.
    ///
    /// Returns `Ok(false)` when a range is degenerate: all interior points
    /// are on line `fl` but not all strictly between `f` and `l`.
    fn untangle(&mut self, points: &mut [Point]) -> Result<bool, SamplingError> {
        let budget = self.config().max_rejections;
        let mut work = vec![(0usize, points.len())];
        while let Some((start, end)) = work.pop() {
            if end - start <= 2 {
                continue;
            }
            let first = points[start];
            let last = points[end - 1];
            let interior = start + 1..end - 1;
            if points[interior.clone()].iter().all(|&p| cross3(p, first, last) == 0) {
                // straight chain: only valid when every point lies between the endpoints
                let span = dot3(first, last, last);
                let offset = |p: Point| dot3(first, p, last);
                if !points[interior.clone()].iter().all(|&p| 0 < offset(p) && offset(p) < span) {
                    return Ok(false);
                }
                points[interior].sort_by_key(|&p| offset(p));
                continue;
            }

            let mut pivot = None;
            for _ in 0..budget {
                let candidate = *self.select(&points[interior.clone()])?;
                if cross3(candidate, first, last) != 0 {
                    pivot = Some(candidate);
                    break;
                }
            }
            let a = pivot.ok_or(SamplingError::RetryBudgetExhausted {
                operation: "simple_polygon",
                attempts: budget,
            })?;

            let mut candidates = vec![last];
            for &p in &points[interior.clone()] {
                let c_first = cross3(a, p, first);
                let c_last = cross3(a, p, last);
                if c_first != 0 && c_first.signum() * c_last.signum() <= 0 {
                    candidates.push(p);
                }
            }
            let b = *self.select(&candidates)?;

            let side = cross3(a, b, first).signum();
            let ray = if cross3(a, b, last) == 0 { last - a } else { b - a };
            let (near, far): (Vec<Point>, Vec<Point>) = points[interior.clone()]
                .iter()
                .filter(|&&p| p != a)
                .partition(|&&p| {
                    let c = cross3(a, b, p);
                    if c != 0 {
                        c.signum() == side
                    } else {
                        dot(p - a, ray) < 0
                    }
                });
            let cut = start + 1 + near.len();
            points[start + 1..cut].copy_from_slice(&near);
            points[cut] = a;
            points[cut + 1..end - 1].copy_from_slice(&far);

            work.push((cut, end));
            work.push((start, cut + 1));
        }
        Ok(true)
    }

    /// `n` lattice points in `(-dim, dim)^2`, no three of them collinear.
    ///
    /// The points lie on a random parabola over the prime field `F_p`, with
    /// `dim <= p < 2 * dim`, mapped through a random invertible rotation-
    /// scaling and translated into range. Three collinear lattice points
    /// would be collinear modulo `p` as well, which a parabola rules out.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `0 <= n < dim <= 2^29 - 1`.
    pub fn non_collinear_points(&mut self, n: i64, dim: i64) -> Result<Vec<Point>, SamplingError> {
        const OP: &str = "non_collinear_points";
        ensure(dim <= MAX_NON_COLLINEAR_DIM, OP, "dim too large")?;
        ensure(n >= 0, OP, "n must be non negative")?;
        ensure(dim > n, OP, "dim too small")?;
        if n == 0 {
            return Ok(Vec::new());
        }

        let p = self.prime(dim, 2 * dim)?;
        let budget = self.config().max_rejections;
        let mut rotation = None;
        for _ in 0..budget {
            let a = self.integer(0, p)?;
            let b = self.integer(0, p)?;
            if (a * a + b * b) % p != 0 {
                rotation = Some((a, b));
                break;
            }
        }
        let (rot_a, rot_b) = rotation.ok_or(SamplingError::RetryBudgetExhausted {
            operation: OP,
            attempts: budget,
        })?;
        let coefficients = [self.integer(1, p)?, self.integer(0, p)?, self.integer(0, p)?];
        let dx = self.integer(-dim + 1, dim - p + 1)?;
        let dy = self.integer(-dim + 1, dim - p + 1)?;

        let xs = self.distinct(n, 0, p)?;
        xs.into_iter()
            .map(|x| {
                let y = coefficients.iter().fold(0, |acc, &c| (acc * x + c) % p);
                let rx = apply_mod(x * rot_a - y * rot_b, p)?;
                let ry = apply_mod(x * rot_b + y * rot_a, p)?;
                Ok(Point::new(rx + dx, ry + dy))
            })
            .collect()
    }
}
