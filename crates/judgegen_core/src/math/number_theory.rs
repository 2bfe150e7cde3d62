//! Modular arithmetic, primality testing and range prime enumeration.
//!
//! All functions work on signed 64-bit integers. Intermediate products are
//! computed in 128 bits, so no operation overflows for any modulus that fits
//! in `i64`.
//!
//! # Primality
//!
//! [`is_prime`] is deterministic for every `i64`: trial division by the first
//! 32 primes, a Fermat filter with base 132, and Miller-Rabin with the seven
//! witnesses found by Jim Sinclair, which together cover all inputs below
//! 2^64.
//!
//! # Range enumeration
//!
//! [`primes`] combines an odd-only bitset sieve of `[0, width)` with a sieved
//! segment over `[lower, upper)`. Numbers the segment cannot certify (those
//! at or above `width²`) fall back to [`is_prime`].

use crate::types::error::{ensure, SamplingError};

/// Primes used for trial division before Miller-Rabin.
pub const TRIAL_PRIMES: [i64; 32] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131,
];

/// Witness set making Miller-Rabin deterministic for all 64-bit inputs.
pub const MILLER_RABIN_WITNESSES: [u64; 7] = [2, 325, 9375, 28178, 450775, 9780504, 1795265022];

/// Largest window [`primes`] sieves by default (2^30 - 1).
pub const MAX_SIEVE_WINDOW: i64 = 0x3FFF_FFFF;

#[inline]
fn mul_mod_u64(lhs: u64, rhs: u64, modulus: u64) -> u64 {
    ((lhs as u128 * rhs as u128) % modulus as u128) as u64
}

fn pow_mod_u64(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut res = 1 % modulus;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            res = mul_mod_u64(res, base, modulus);
        }
        base = mul_mod_u64(base, base, modulus);
        exp >>= 1;
    }
    res
}

/// Reduces `x` into `[0, modulus)`.
///
/// # Errors
///
/// `InvalidArgument` if `modulus` is not positive.
///
/// # Examples
///
/// ```
/// use judgegen_core::math::number_theory::apply_mod;
///
/// assert_eq!(apply_mod(-1, 3).unwrap(), 2);
/// ```
pub fn apply_mod(x: i64, modulus: i64) -> Result<i64, SamplingError> {
    ensure(modulus > 0, "apply_mod", "mod must be positive")?;
    Ok(x.rem_euclid(modulus))
}

/// Computes `lhs * rhs mod modulus` without overflow.
///
/// # Errors
///
/// `InvalidArgument` if `modulus` is not positive.
pub fn mul_mod(lhs: i64, rhs: i64, modulus: i64) -> Result<i64, SamplingError> {
    ensure(modulus > 0, "mul_mod", "mod must be positive")?;
    let l = lhs.rem_euclid(modulus) as u64;
    let r = rhs.rem_euclid(modulus) as u64;
    Ok(mul_mod_u64(l, r, modulus as u64) as i64)
}

/// Computes `base^exp mod modulus` by square-and-multiply.
///
/// # Errors
///
/// `InvalidArgument` if `modulus` is not positive or `exp` is negative.
///
/// # Examples
///
/// ```
/// use judgegen_core::math::number_theory::pow_mod;
///
/// assert_eq!(pow_mod(3, 4, 5).unwrap(), 1);
/// ```
pub fn pow_mod(base: i64, exp: i64, modulus: i64) -> Result<i64, SamplingError> {
    ensure(modulus > 0, "pow_mod", "mod must be positive")?;
    ensure(exp >= 0, "pow_mod", "exp must be non negative")?;
    let b = base.rem_euclid(modulus) as u64;
    Ok(pow_mod_u64(b, exp as u64, modulus as u64) as i64)
}

/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`.
fn extended_euclid(a: i64, b: i64) -> (i64, i64, i64) {
    if a == 0 {
        (b, 0, 1)
    } else {
        let (g, x1, y1) = extended_euclid(b % a, a);
        (g, y1 - (b / a) * x1, x1)
    }
}

/// Multiplicative inverse of `n` modulo `modulus`, or `None` when
/// `gcd(n, modulus) != 1`.
///
/// # Errors
///
/// `InvalidArgument` if `modulus` is not positive.
///
/// # Examples
///
/// ```
/// use judgegen_core::math::number_theory::mult_inv;
///
/// assert_eq!(mult_inv(5, 17).unwrap(), Some(7));
/// assert_eq!(mult_inv(5, 10).unwrap(), None);
/// ```
pub fn mult_inv(n: i64, modulus: i64) -> Result<Option<i64>, SamplingError> {
    ensure(modulus > 0, "mult_inv", "mod must be positive")?;
    let (g, x, _) = extended_euclid(n.rem_euclid(modulus), modulus);
    if g != 1 {
        return Ok(None);
    }
    Ok(Some(x.rem_euclid(modulus)))
}

/// Deterministic primality test for every `i64`.
///
/// Values below 2 (including negatives) are not prime.
///
/// # Examples
///
/// ```
/// use judgegen_core::math::number_theory::is_prime;
///
/// assert!(is_prime(2));
/// assert!(!is_prime(512461));
/// assert!(is_prime(i64::MAX - 24));
/// ```
pub fn is_prime(n: i64) -> bool {
    for &p in TRIAL_PRIMES.iter() {
        if n <= p || n % p == 0 {
            return n == p;
        }
    }

    let un = n as u64;
    // fermat filter with the first base past the trial primes
    let fermat_base = TRIAL_PRIMES[TRIAL_PRIMES.len() - 1] as u64 + 1;
    if pow_mod_u64(fermat_base, un - 1, un) != 1 {
        return false;
    }

    let mut d = un - 1;
    let mut j = 0u32;
    while d % 2 == 0 {
        d /= 2;
        j += 1;
    }

    for &a in MILLER_RABIN_WITNESSES.iter() {
        if a % un == 0 {
            continue;
        }
        let mut v = pow_mod_u64(a, d, un);
        if v == 1 || v == un - 1 {
            continue;
        }
        for _ in 1..j {
            v = mul_mod_u64(v, v, un);
            if v == un - 1 || v <= 1 {
                break;
            }
        }
        if v != un - 1 {
            return false;
        }
    }
    true
}

/// Fixed-size bitset backing the sieves.
struct BitSet {
    words: Vec<u64>,
}

impl BitSet {
    fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
        }
    }

    #[inline]
    fn set(&mut self, i: usize) {
        self.words[i / 64] |= 1 << (i % 64);
    }

    #[inline]
    fn get(&self, i: usize) -> bool {
        self.words[i / 64] >> (i % 64) & 1 == 1
    }
}

/// All primes in `[lower, upper)` in increasing order.
///
/// Equivalent to [`primes_with_limit`] with [`MAX_SIEVE_WINDOW`].
///
/// # Examples
///
/// ```
/// use judgegen_core::math::number_theory::primes;
///
/// assert_eq!(primes(10, 30).unwrap(), vec![11, 13, 17, 19, 23, 29]);
/// ```
pub fn primes(lower: i64, upper: i64) -> Result<Vec<i64>, SamplingError> {
    primes_with_limit(lower, upper, MAX_SIEVE_WINDOW)
}

/// All primes in `[lower, upper)` using a sieve window of at most `limit`.
///
/// # Errors
///
/// - `InvalidArgument` if `lower >= upper` or `limit` is outside `[1, 2^30)`
/// - `RangeTooLarge` if the clamped window `[max(2, lower), upper)` is wider
///   than `limit`
pub fn primes_with_limit(lower: i64, upper: i64, limit: i64) -> Result<Vec<i64>, SamplingError> {
    ensure(lower < upper, "primes", "lower must be less than upper")?;
    ensure(
        0 < limit && limit <= MAX_SIEVE_WINDOW,
        "primes",
        "sieve limit must be in [1, 2^30)",
    )?;
    let lower = lower.max(2);
    let upper = upper.max(2);
    let count = upper - lower;
    if count > limit {
        return Err(SamplingError::RangeTooLarge {
            operation: "primes",
            width: count,
            limit,
        });
    }

    let cache = ((count + 1) / 2) as usize;
    let mut not_prime = BitSet::new(cache);
    let mut not_prime_segment = BitSet::new(cache);

    let mut i = 3;
    while i < count {
        if !not_prime.get((i / 2) as usize) {
            let mut j = i * i;
            while j < count {
                not_prime.set((j / 2) as usize);
                j += 2 * i;
            }
            let mut lowest = lower - lower % (2 * i) + i;
            if lowest < lower {
                lowest += 2 * i;
            }
            let mut j = (i * i).max(lowest);
            while j < upper {
                not_prime_segment.set(((j - lower) / 2) as usize);
                match j.checked_add(2 * i) {
                    Some(next) => j = next,
                    None => break,
                }
            }
        }
        i += 2;
    }

    let mut res = Vec::new();
    if lower <= 2 && 2 < upper {
        res.push(2);
    }
    let mut i = lower | 1;
    while i < upper {
        if !not_prime_segment.get(((i - lower) / 2) as usize) && (i < count * count || is_prime(i))
        {
            res.push(i);
        }
        match i.checked_add(2) {
            Some(next) => i = next,
            None => break,
        }
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    const I64_MAX: i64 = i64::MAX;

    #[test]
    fn test_apply_mod() {
        assert_eq!(apply_mod(1, 3).unwrap(), 1);
        assert_eq!(apply_mod(-1, 3).unwrap(), 2);
        assert!(apply_mod(1, 0).is_err());
    }

    #[test]
    fn test_mul_mod_near_limit() {
        assert_eq!(mul_mod(I64_MAX - 1, I64_MAX - 1, I64_MAX).unwrap(), 1);
        assert_eq!(mul_mod(I64_MAX - 1, I64_MAX - 2, I64_MAX).unwrap(), 2);
        assert_eq!(mul_mod(I64_MAX - 2, I64_MAX - 2, I64_MAX).unwrap(), 4);
    }

    #[test]
    fn test_pow_mod() {
        assert_eq!(pow_mod(0xFFFF_FFFF, 2, 0x1_0000_0000).unwrap(), 1);
        assert_eq!(pow_mod(0xFFFF_FFFD, 31, 0xFFFF_FFFF).unwrap(), 0x7FFF_FFFF);
        assert_eq!(pow_mod(0xFFFF_FFFD, 63, 0xFFFF_FFFF).unwrap(), 0x7FFF_FFFF);
        assert_eq!(pow_mod(I64_MAX - 1, 2, I64_MAX).unwrap(), 1);
        assert_eq!(pow_mod(I64_MAX - 1, 3, I64_MAX).unwrap(), I64_MAX - 1);
        assert_eq!(pow_mod(I64_MAX - 2, 63, I64_MAX).unwrap(), I64_MAX - 1);
        assert_eq!(pow_mod(7, 0, 1).unwrap(), 0);
        assert!(pow_mod(2, -1, 5).is_err());
    }

    #[test]
    fn test_mult_inv() {
        assert_eq!(mult_inv(5, 17).unwrap(), Some(pow_mod(5, 15, 17).unwrap()));
        assert_eq!(mult_inv(5, 10).unwrap(), None);
        assert_eq!(mult_inv(-5, 17).unwrap(), Some(10));
    }

    #[test]
    fn test_is_prime_small() {
        assert!(!is_prime(-3));
        assert!(!is_prime(-2));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(131));
        assert!(is_prime(137));
        assert!(!is_prime(131 * 137));
        assert!(!is_prime(512461));
    }

    #[test]
    fn test_is_prime_large() {
        assert!(is_prime(I64_MAX - 164));
        assert!(!is_prime(I64_MAX - 25));
        assert!(is_prime(I64_MAX - 24));
        assert!(!is_prime(I64_MAX - 23));
        assert!(!is_prime(I64_MAX));
        assert!(!is_prime(2147483647 * 4294967291));
        assert!(is_prime(1_000_000_007));
        // strong pseudoprime to bases 2, 3, 5, 7
        assert!(!is_prime(3_215_031_751));
    }

    #[test]
    fn test_primes_small_window() {
        assert_eq!(primes(0, 20).unwrap(), vec![2, 3, 5, 7, 11, 13, 17, 19]);
        assert_eq!(primes(-10, 3).unwrap(), vec![2]);
        assert_eq!(primes(14, 17).unwrap(), Vec::<i64>::new());
        assert_eq!(primes(17, 18).unwrap(), vec![17]);
    }

    #[test]
    fn test_primes_matches_is_prime() {
        let found = primes(0, 10_000).unwrap();
        let expected: Vec<i64> = (0..10_000).filter(|&x| is_prime(x)).collect();
        assert_eq!(found, expected);
        assert_eq!(found.len(), 1229);
    }

    #[test]
    fn test_primes_offset_window() {
        let lower = 1_000_000_000;
        let found = primes(lower, lower + 1000).unwrap();
        let expected: Vec<i64> = (lower..lower + 1000).filter(|&x| is_prime(x)).collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_primes_near_i64_max() {
        let found = primes(I64_MAX - 200, I64_MAX).unwrap();
        assert!(found.contains(&(I64_MAX - 164)));
        assert!(found.contains(&(I64_MAX - 24)));
        assert!(found.iter().all(|&p| is_prime(p)));
    }

    #[test]
    fn test_primes_rejects_invalid_range() {
        assert!(primes(5, 5).is_err());
        assert_eq!(
            primes_with_limit(0, 1000, 100),
            Err(SamplingError::RangeTooLarge {
                operation: "primes",
                width: 998,
                limit: 100,
            })
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn trial_division(n: i64) -> bool {
            n > 1 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(128))]

            #[test]
            fn test_is_prime_agrees_with_sieve(lower in 0_i64..1_000_000_000_000, width in 1_i64..2000) {
                let sieved = primes(lower, lower + width).unwrap();
                let tested: Vec<i64> = (lower..lower + width).filter(|&x| is_prime(x)).collect();
                prop_assert_eq!(sieved, tested);
            }

            #[test]
            fn test_is_prime_agrees_with_trial_division(n in -10_i64..2_000_000) {
                prop_assert_eq!(is_prime(n), trial_division(n));
            }
        }
    }
}
