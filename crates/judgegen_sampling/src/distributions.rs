//! Derived distributions.
//!
//! Parameterised distributions are value objects validated on construction.
//! Each implements [`rand_distr::Distribution`] for unbounded draws and
//! offers `sample_within` for draws conditioned on a half-open range, which
//! is a rejection loop bounded by an explicit budget.
//!
//! All transcendental functions come from `libm`, so the same engine output
//! maps to the same value on every platform.

use std::f64::consts::PI;

use judgegen_core::types::error::{ensure, ensure_domain};
use judgegen_core::types::SamplingError;
use rand::Rng;
use rand_core::RngCore;
use rand_distr::Distribution;
use tracing::debug;

use crate::uniform::{lemire, unit_real};

fn exhausted(operation: &'static str, attempts: usize) -> SamplingError {
    debug!(operation, attempts, "rejection budget exhausted");
    SamplingError::RetryBudgetExhausted {
        operation,
        attempts,
    }
}

/// Normal distribution sampled with the Box-Muller transform.
///
/// # Examples
///
/// ```rust
/// use judgegen_sampling::distributions::Normal;
/// use judgegen_sampling::rng::Xoshiro256StarStar;
/// use rand_core::SeedableRng;
/// use rand_distr::Distribution;
///
/// let normal = Normal::new(10.0, 2.0).unwrap();
/// let mut rng = Xoshiro256StarStar::seed_from_u64(42);
/// let x: f64 = normal.sample(&mut rng);
/// assert!(x.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    stddev: f64,
}

impl Normal {
    /// Creates a normal distribution.
    ///
    /// # Errors
    ///
    /// `Domain` if `mean` is NaN or `stddev` is negative or NaN.
    pub fn new(mean: f64, stddev: f64) -> Result<Self, SamplingError> {
        ensure_domain(!mean.is_nan(), "normal", "mean must not be NaN")?;
        ensure_domain(stddev >= 0.0, "normal", "standard deviation must be non negative")?;
        Ok(Self { mean, stddev })
    }

    /// Mean of the distribution.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of the distribution.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    #[inline]
    fn polar<R: RngCore + ?Sized>(rng: &mut R) -> (f64, f64) {
        let u1 = unit_real(rng);
        let u2 = unit_real(rng);
        (libm::sqrt(-2.0 * libm::log(u1)), 2.0 * PI * u2)
    }

    /// Draws a value in `[lower, upper)`.
    ///
    /// Each uniform pair is tried with the cosine and then the sine branch
    /// before being discarded.
    ///
    /// # Errors
    ///
    /// - `Domain` if a bound is NaN
    /// - `InvalidArgument` unless `lower < upper`
    /// - `RetryBudgetExhausted` after `budget` rejected pairs
    pub fn sample_within<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        lower: f64,
        upper: f64,
        budget: usize,
    ) -> Result<f64, SamplingError> {
        ensure_domain(!lower.is_nan(), "normal", "lower must not be NaN")?;
        ensure_domain(!upper.is_nan(), "normal", "upper must not be NaN")?;
        ensure(lower < upper, "normal", "lower must be less than upper")?;
        for _ in 0..budget {
            let (radius, angle) = Self::polar(rng);
            for z in [libm::cos(angle), libm::sin(angle)] {
                let res = self.stddev * radius * z + self.mean;
                if lower <= res && res < upper {
                    return Ok(res);
                }
            }
        }
        Err(exhausted("normal", budget))
    }
}

impl Distribution<f64> for Normal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let (radius, angle) = Self::polar(rng);
        self.stddev * radius * libm::cos(angle) + self.mean
    }
}

/// Exponential distribution with rate `lambda`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    lambda: f64,
}

impl Exponential {
    /// Creates an exponential distribution.
    ///
    /// # Errors
    ///
    /// `Domain` unless `lambda > 0`.
    pub fn new(lambda: f64) -> Result<Self, SamplingError> {
        ensure_domain(lambda > 0.0, "exponential", "lambda must be positive")?;
        Ok(Self { lambda })
    }

    /// Rate parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Draws `lower + X` conditioned on being below `upper`.
    ///
    /// # Errors
    ///
    /// - `Domain` if `lower` is not finite or `upper` is NaN
    /// - `InvalidArgument` unless `lower < upper`
    /// - `RetryBudgetExhausted` after `budget` rejected draws
    pub fn sample_within<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        lower: f64,
        upper: f64,
        budget: usize,
    ) -> Result<f64, SamplingError> {
        ensure_domain(lower.is_finite(), "exponential", "lower must be finite")?;
        ensure_domain(!upper.is_nan(), "exponential", "upper must not be NaN")?;
        ensure(lower < upper, "exponential", "lower must be less than upper")?;
        for _ in 0..budget {
            let res = lower - libm::log(unit_real(rng)) / self.lambda;
            if res < upper {
                return Ok(res);
            }
        }
        Err(exhausted("exponential", budget))
    }
}

impl Distribution<f64> for Exponential {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        -libm::log(unit_real(rng)) / self.lambda
    }
}

/// Geometric distribution counting failures before the first success.
///
/// Sampled by inversion: `floor(ln(u) / ln(1 - p))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometric {
    p: f64,
    log_q: f64,
}

impl Geometric {
    /// Creates a geometric distribution with success probability `p`.
    ///
    /// With `p == 0` no trial ever succeeds and every draw saturates to
    /// `i64::MAX`.
    ///
    /// # Errors
    ///
    /// `Domain` unless `0 <= p < 1`.
    pub fn new(p: f64) -> Result<Self, SamplingError> {
        ensure_domain((0.0..1.0).contains(&p), "geometric", "p must be in [0,1)")?;
        Ok(Self {
            p,
            log_q: libm::log1p(-p),
        })
    }

    /// Success probability.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Draws `lower + X` conditioned on being below `upper`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` unless `lower < upper`
    /// - `RetryBudgetExhausted` after `budget` rejected draws
    pub fn sample_within<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        lower: i64,
        upper: i64,
        budget: usize,
    ) -> Result<i64, SamplingError> {
        ensure(lower < upper, "geometric", "lower must be less than upper")?;
        for _ in 0..budget {
            let res = lower.saturating_add(self.draw(rng));
            if res < upper {
                return Ok(res);
            }
        }
        Err(exhausted("geometric", budget))
    }

    #[inline]
    fn draw<R: RngCore + ?Sized>(&self, rng: &mut R) -> i64 {
        libm::floor(libm::log(unit_real(rng)) / self.log_q) as i64
    }
}

impl Distribution<i64> for Geometric {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.draw(rng)
    }
}

/// Binomial distribution over `[0, n]`.
///
/// Small means (`n * min(p, 1 - p) < 10`) use geometric waiting times.
/// Larger means use the BTRS transformed-rejection sampler, accepting when
/// `ln(v) <= h - lgamma(k + 1) - lgamma(n - k + 1) + (k - m) * ln(p / q)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    n: i64,
    p: f64,
}

impl Binomial {
    /// Creates a binomial distribution.
    ///
    /// # Errors
    ///
    /// `Domain` if `n < 0` or `p` is outside `[0, 1]`.
    pub fn new(n: i64, p: f64) -> Result<Self, SamplingError> {
        ensure_domain(n >= 0, "binomial", "n must be non negative")?;
        ensure_domain((0.0..=1.0).contains(&p), "binomial", "p must be in [0,1]")?;
        Ok(Self { n, p })
    }

    /// Number of trials.
    pub fn n(&self) -> i64 {
        self.n
    }

    /// Success probability of one trial.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Draws a value conditioned on lying in `[lower, upper)`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` unless `lower < upper`
    /// - `RetryBudgetExhausted` after `budget` rejected draws
    pub fn sample_within<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        lower: i64,
        upper: i64,
        budget: usize,
    ) -> Result<i64, SamplingError> {
        ensure(lower < upper, "binomial", "lower must be less than upper")?;
        for _ in 0..budget {
            let res = self.draw(rng);
            if lower <= res && res < upper {
                return Ok(res);
            }
        }
        Err(exhausted("binomial", budget))
    }

    fn draw<R: RngCore + ?Sized>(&self, rng: &mut R) -> i64 {
        let n = self.n;
        let swap = self.p > 0.5;
        let p = self.p.min(1.0 - self.p);
        let k = if p * (n as f64) < 10.0 {
            Self::waiting_times(rng, n, p)
        } else {
            Self::btrs(rng, n, p)
        };
        if swap {
            n - k
        } else {
            k
        }
    }

    fn waiting_times<R: RngCore + ?Sized>(rng: &mut R, n: i64, p: f64) -> i64 {
        let lg = libm::log1p(-p);
        if lg >= 0.0 {
            return 0;
        }
        let mut res = 0;
        let mut y: i64 = 0;
        loop {
            let gap = libm::floor(libm::log(unit_real(rng)) / lg) as i64;
            y = y.saturating_add(gap).saturating_add(1);
            if y > n {
                return res;
            }
            res += 1;
        }
    }

    fn btrs<R: RngCore + ?Sized>(rng: &mut R, n: i64, p: f64) -> i64 {
        let nf = n as f64;
        let q = 1.0 - p;
        let spq = libm::sqrt(nf * p * q);
        let b = 1.15 + 2.53 * spq;
        let a = -0.0873 + 0.0248 * b + 0.01 * p;
        let c = nf * p + 0.5;
        let vr = 0.92 - 4.2 / b;

        // alpha, ln(p/q), mode and the log-factorial term at the mode
        let mut tail: Option<(f64, f64, f64, f64)> = None;
        loop {
            let u = unit_real(rng) - 0.5;
            let us = 0.5 - libm::fabs(u);
            let k = libm::floor((2.0 * a / us + b) * u + c) as i64;
            if k < 0 || k > n {
                continue;
            }

            let mut v = unit_real(rng);
            if us >= 0.07 && v <= vr {
                return k;
            }

            let (alpha, lpq, m, h) = *tail.get_or_insert_with(|| {
                let m = libm::floor((nf + 1.0) * p);
                (
                    (2.83 + 5.1 / b) * spq,
                    libm::log(p / q),
                    m,
                    libm::lgamma(m + 1.0) + libm::lgamma(nf - m + 1.0),
                )
            });
            v *= alpha / (a / (us * us) + b);
            let kf = k as f64;
            if libm::log(v) <= h - libm::lgamma(kf + 1.0) - libm::lgamma(nf - kf + 1.0) + (kf - m) * lpq {
                return k;
            }
        }
    }
}

impl Distribution<i64> for Binomial {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.draw(rng)
    }
}

/// Weighted choice of an index with probability `weights[i] / sum`.
///
/// # Examples
///
/// ```rust
/// use judgegen_sampling::distributions::Discrete;
/// use judgegen_sampling::rng::Xoshiro256StarStar;
/// use rand_core::SeedableRng;
/// use rand_distr::Distribution;
///
/// let dice = Discrete::new(&[0, 1, 0]).unwrap();
/// let mut rng = Xoshiro256StarStar::seed_from_u64(3);
/// let i: usize = dice.sample(&mut rng);
/// assert_eq!(i, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrete {
    prefix: Vec<i64>,
}

impl Discrete {
    /// Creates the distribution from non-negative integer weights.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a weight is negative, the weights sum to zero
    /// or the sum overflows `i64`.
    pub fn new(weights: &[i64]) -> Result<Self, SamplingError> {
        let mut prefix = Vec::with_capacity(weights.len());
        let mut sum: i64 = 0;
        for &w in weights {
            ensure(w >= 0, "discrete", "weights must be non negative")?;
            sum = sum
                .checked_add(w)
                .ok_or_else(|| SamplingError::invalid_argument("discrete", "sum of weights overflows"))?;
            prefix.push(sum);
        }
        ensure(sum > 0, "discrete", "sum of weights must be positive")?;
        Ok(Self { prefix })
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    /// Always false: construction rejects empty weight lists.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    fn draw<R: RngCore + ?Sized>(&self, rng: &mut R) -> usize {
        let total = self.prefix[self.prefix.len() - 1];
        let x = lemire(rng, total as u64) as i64;
        self.prefix.partition_point(|&p| p <= x)
    }
}

impl Distribution<usize> for Discrete {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.draw(rng)
    }
}

/// Offset in `[0, range)` distributed as the maximum of `n` uniform draws.
fn max_offset<R: RngCore + ?Sized>(rng: &mut R, range: u64, n: i64) -> u64 {
    if n < 5 {
        let mut res = 0;
        for _ in 0..n {
            res = res.max(lemire(rng, range));
        }
        res
    } else {
        let scaled = (range as f64) * libm::exp2(libm::log2(unit_real(rng)) / n as f64);
        (scaled as u64).min(range - 1)
    }
}

/// Maximum of `n` independent uniform integers in `[lower, upper)`.
///
/// Uses `n` explicit draws for `n < 5` and a single inverse-CDF draw
/// otherwise.
///
/// # Errors
///
/// `InvalidArgument` unless `n > 0` and `lower < upper`.
pub fn maximum<R: RngCore + ?Sized>(
    rng: &mut R,
    lower: i64,
    upper: i64,
    n: i64,
) -> Result<i64, SamplingError> {
    ensure(n > 0, "maximum", "n must be positive")?;
    ensure(lower < upper, "maximum", "lower must be less than upper")?;
    let range = (upper as u64).wrapping_sub(lower as u64);
    Ok(max_offset(rng, range, n).wrapping_add(lower as u64) as i64)
}

/// Minimum of `n` independent uniform integers in `[lower, upper)`.
///
/// # Errors
///
/// `InvalidArgument` unless `n > 0` and `lower < upper`.
pub fn minimum<R: RngCore + ?Sized>(
    rng: &mut R,
    lower: i64,
    upper: i64,
    n: i64,
) -> Result<i64, SamplingError> {
    ensure(n > 0, "minimum", "n must be positive")?;
    ensure(lower < upper, "minimum", "lower must be less than upper")?;
    let range = (upper as u64).wrapping_sub(lower as u64);
    let offset = max_offset(rng, range, n);
    Ok((upper as u64).wrapping_sub(1).wrapping_sub(offset) as i64)
}

/// Maximum of `n` draws for positive `n`, minimum of `|n|` draws for
/// negative `n`.
///
/// # Errors
///
/// `InvalidArgument` if `n == 0` or `lower >= upper`.
pub fn minmax<R: RngCore + ?Sized>(
    rng: &mut R,
    lower: i64,
    upper: i64,
    n: i64,
) -> Result<i64, SamplingError> {
    ensure(n != 0, "minmax", "n must not be zero")?;
    if n > 0 {
        maximum(rng, lower, upper, n)
    } else {
        let count = n
            .checked_neg()
            .ok_or_else(|| SamplingError::invalid_argument("minmax", "n out of range"))?;
        minimum(rng, lower, upper, count)
    }
}

/// Draws an index of `weights` with probability proportional to its weight.
///
/// Convenience wrapper building a [`Discrete`] for a single draw.
pub fn discrete<R: RngCore + ?Sized>(rng: &mut R, weights: &[i64]) -> Result<usize, SamplingError> {
    let dist = Discrete::new(weights)?;
    Ok(dist.draw(rng))
}
