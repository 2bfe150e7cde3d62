//! Prime sampling.

use judgegen_core::math::number_theory::{self, is_prime, MAX_SIEVE_WINDOW};
use judgegen_core::types::error::ensure;
use judgegen_core::types::SamplingError;
use rand_core::RngCore;
use tracing::debug;

use crate::sampler::Sampler;

impl<E: RngCore> Sampler<E> {
    /// Uniformly random prime in `[lower, upper)`.
    ///
    /// Draws odd candidates (and `2` when the range starts at or below it)
    /// and keeps the first one passing [`is_prime`]. The number of draws is
    /// capped by the expected prime density of the range and by
    /// `SamplerConfig::max_prime_trials`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` unless `lower < upper`
    /// - `StructuralImpossibility` if no candidate passes within the budget,
    ///   which in practice means the range holds no prime
    ///
    /// # Examples
    ///
    /// ```rust
    /// use judgegen_sampling::Sampler;
    /// use judgegen_core::math::number_theory::is_prime;
    ///
    /// let mut sampler = Sampler::new(17);
    /// let p = sampler.prime(1_000, 2_000).unwrap();
    /// assert!(is_prime(p) && (1_000..2_000).contains(&p));
    /// ```
    pub fn prime(&mut self, lower: i64, upper: i64) -> Result<i64, SamplingError> {
        ensure(lower < upper, "prime", "lower must be less than upper")?;
        let sample_lower = if lower <= 2 { 0 } else { lower / 2 };
        let sample_upper = upper / 2;

        let budget = self.prime_budget(lower, upper);
        if sample_lower < sample_upper {
            for _ in 0..budget {
                let candidate = (2 * self.integer(sample_lower, sample_upper)? + 1).max(2);
                if candidate < upper && is_prime(candidate) {
                    return Ok(candidate);
                }
            }
        }
        debug!(lower, upper, attempts = budget, "prime search exhausted");
        Err(SamplingError::impossible("prime", "range contains no primes"))
    }

    /// Draw budget of [`Sampler::prime`] for `[lower, upper)`.
    fn prime_budget(&self, lower: i64, upper: i64) -> usize {
        let density = (64.0 * libm::log(upper as f64)).max(0.0) as usize;
        let width = (upper as u64).wrapping_sub(lower as u64);
        let spread = usize::try_from(width.saturating_mul(4)).unwrap_or(usize::MAX);
        density.max(spread).min(self.config().max_prime_trials)
    }

    /// All primes in `[lower, upper)`, sieving at most
    /// `SamplerConfig::sieve_window` values.
    ///
    /// Consumes no entropy.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` unless `lower < upper`
    /// - `RangeTooLarge` if the window exceeds the configured cap
    pub fn primes(&self, lower: i64, upper: i64) -> Result<Vec<i64>, SamplingError> {
        let limit = self.config().sieve_window.clamp(1, MAX_SIEVE_WINDOW);
        number_theory::primes_with_limit(lower, upper, limit)
    }
}
