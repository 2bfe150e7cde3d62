//! Unbiased bounded sampling primitives.
//!
//! Every higher-level generator is built from the functions in this module.
//! They are generic over any [`RngCore`] so they can be used with the
//! engines in [`crate::rng`] or any other 64-bit generator.
//!
//! Only integer arithmetic and exactly rounded `f64` operations are used, so
//! results are identical on every platform.

use judgegen_core::types::error::{ensure, ensure_domain};
use judgegen_core::types::SamplingError;
use rand_core::RngCore;
use tracing::debug;

/// Draws a value uniformly from `[0, range)` using Lemire's nearly
/// divisionless method.
///
/// `range` must be non-zero.
#[inline]
pub fn lemire<R: RngCore + ?Sized>(rng: &mut R, range: u64) -> u64 {
    debug_assert!(range > 0);
    let mut m = u128::from(rng.next_u64()) * u128::from(range);
    if (m as u64) < range {
        let threshold = range.wrapping_neg() % range;
        while (m as u64) < threshold {
            m = u128::from(rng.next_u64()) * u128::from(range);
        }
    }
    (m >> 64) as u64
}

/// Uniform integer over the full `i64` range.
#[inline]
pub fn full_integer<R: RngCore + ?Sized>(rng: &mut R) -> i64 {
    rng.next_u64() as i64
}

/// Uniform integer in `[lower, upper)`.
///
/// # Errors
///
/// `InvalidArgument` unless `lower < upper`.
///
/// # Examples
///
/// ```rust
/// use judgegen_sampling::rng::Xoshiro256StarStar;
/// use judgegen_sampling::uniform;
/// use rand_core::SeedableRng;
///
/// let mut rng = Xoshiro256StarStar::seed_from_u64(1);
/// let x = uniform::integer(&mut rng, -5, 5).unwrap();
/// assert!((-5..5).contains(&x));
/// ```
pub fn integer<R: RngCore + ?Sized>(
    rng: &mut R,
    lower: i64,
    upper: i64,
) -> Result<i64, SamplingError> {
    ensure(lower < upper, "integer", "lower must be less than upper")?;
    let range = (upper as u64).wrapping_sub(lower as u64);
    Ok((lemire(rng, range).wrapping_add(lower as u64)) as i64)
}

/// Uniform integer in `[0, upper)`.
#[inline]
pub fn integer_below<R: RngCore + ?Sized>(rng: &mut R, upper: i64) -> Result<i64, SamplingError> {
    integer(rng, 0, upper)
}

/// Uniform bit, the parity of the popcount of one engine output.
#[inline]
pub fn bit<R: RngCore + ?Sized>(rng: &mut R) -> bool {
    rng.next_u64().count_ones() & 1 == 1
}

/// Uniform real in `[0, 1)` with full precision near zero.
///
/// The 53-bit mantissa comes from the high bits of one engine output with
/// the leading bit forced. The exponent is then lowered by a geometrically
/// distributed amount, read off the trailing zeros of further outputs, so
/// every representable value below one is reachable with the correct
/// probability. The composition is exact and never rounds up to `1.0`.
pub fn unit_real<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    let mantissa = (rng.next_u64() >> 11) | (1u64 << 52);
    let mut exponent: i32 = -53;
    loop {
        let word = rng.next_u64();
        exponent -= word.trailing_zeros() as i32;
        if word != 0 {
            break;
        }
    }
    libm::ldexp(mantissa as f64, exponent)
}

/// Uniform real in `[0, upper)`.
///
/// # Errors
///
/// - `Domain` if `upper` is not finite
/// - `InvalidArgument` if `upper <= 0`
/// - `RetryBudgetExhausted` if no draw lands inside the range within
///   `budget` attempts
pub fn real_below<R: RngCore + ?Sized>(
    rng: &mut R,
    upper: f64,
    budget: usize,
) -> Result<f64, SamplingError> {
    ensure_domain(upper.is_finite(), "real", "upper must be finite")?;
    ensure(upper > 0.0, "real", "upper must be greater than zero")?;
    for _ in 0..budget {
        let res = unit_real(rng) * upper;
        if (0.0..upper).contains(&res) {
            return Ok(res);
        }
    }
    debug!(operation = "real", attempts = budget, "rejection budget exhausted");
    Err(SamplingError::RetryBudgetExhausted {
        operation: "real",
        attempts: budget,
    })
}

/// Uniform real in `[lower, upper)`.
///
/// Interpolates `lower * (1 - x) + upper * x` and rejects the rare results
/// rounding out of the half-open range.
///
/// # Errors
///
/// - `Domain` if either bound is not finite
/// - `InvalidArgument` unless `lower < upper`
/// - `RetryBudgetExhausted` after `budget` rejected draws
pub fn real<R: RngCore + ?Sized>(
    rng: &mut R,
    lower: f64,
    upper: f64,
    budget: usize,
) -> Result<f64, SamplingError> {
    ensure_domain(lower.is_finite(), "real", "lower must be finite")?;
    ensure_domain(upper.is_finite(), "real", "upper must be finite")?;
    ensure(lower < upper, "real", "lower must be less than upper")?;
    for _ in 0..budget {
        let x = unit_real(rng);
        let res = lower * (1.0 - x) + upper * x;
        if lower <= res && res < upper {
            return Ok(res);
        }
    }
    debug!(operation = "real", attempts = budget, "rejection budget exhausted");
    Err(SamplingError::RetryBudgetExhausted {
        operation: "real",
        attempts: budget,
    })
}
