//! The [`Sampler`] facade.
//!
//! A sampler owns one engine and one [`SamplerConfig`]. Every operation of
//! the crate is a method on it; the combinatorial, number-theoretic and
//! geometric generators live in their own modules as further `impl` blocks.

use std::marker::PhantomData;

use judgegen_core::types::SamplingError;
use rand_core::{Error, RngCore, SeedableRng};
use tracing::debug;

use crate::config::SamplerConfig;
use crate::distributions::{self, Binomial, Discrete, Exponential, Geometric, Normal};
use crate::rng::{Xoshiro256StarStar, DEFAULT_SEED};
use crate::uniform;

/// Deterministic sampling session.
///
/// Entropy is consumed in a fixed order for a given sequence of calls, so
/// the same seed and the same calls reproduce the same output everywhere.
/// A sampler is deliberately neither `Send` nor `Sync`: one generator run
/// owns one sampler.
///
/// # Examples
///
/// ```rust
/// use judgegen_sampling::Sampler;
///
/// let mut a = Sampler::new(2024);
/// let mut b = Sampler::new(2024);
/// assert_eq!(a.integer(0, 100).unwrap(), b.integer(0, 100).unwrap());
///
/// let perm = a.permutation(5, 1).unwrap();
/// let mut sorted = perm.clone();
/// sorted.sort();
/// assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct Sampler<E = Xoshiro256StarStar> {
    engine: E,
    config: SamplerConfig,
    seed: Option<u64>,
    _not_send: PhantomData<*const ()>,
}

impl Sampler<Xoshiro256StarStar> {
    /// Creates a sampler over the default xoshiro256** engine.
    pub fn new(seed: u64) -> Self {
        Self::from_seed(seed)
    }
}

impl<E: RngCore + SeedableRng> Sampler<E> {
    /// Creates a sampler whose engine is seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            engine: E::seed_from_u64(seed),
            config: SamplerConfig::default(),
            seed: Some(seed),
            _not_send: PhantomData,
        }
    }

    /// Re-seeds the engine.
    ///
    /// Intended to be called before the first draw of a session.
    pub fn reseed(&mut self, seed: u64) {
        debug!(seed, "reseeding sampler");
        self.engine = E::seed_from_u64(seed);
        self.seed = Some(seed);
    }
}

impl<E: RngCore + SeedableRng> Default for Sampler<E> {
    fn default() -> Self {
        Self::from_seed(DEFAULT_SEED)
    }
}

impl<E: RngCore> Sampler<E> {
    /// Wraps an already initialised engine.
    pub fn from_engine(engine: E) -> Self {
        Self {
            engine,
            config: SamplerConfig::default(),
            seed: None,
            _not_send: PhantomData,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SamplerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    #[inline]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Seed of the engine, if the sampler was seeded through it.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Mutable access to the underlying engine.
    #[inline]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consumes the sampler, returning its engine.
    pub fn into_engine(self) -> E {
        self.engine
    }

    // ------------------------------------------------------------------
    // Uniform primitives
    // ------------------------------------------------------------------

    /// Uniform bit.
    #[inline]
    pub fn bit(&mut self) -> bool {
        uniform::bit(&mut self.engine)
    }

    /// Uniform integer over the whole `i64` range.
    #[inline]
    pub fn full_integer(&mut self) -> i64 {
        uniform::full_integer(&mut self.engine)
    }

    /// Uniform integer in `[lower, upper)`.
    #[inline]
    pub fn integer(&mut self, lower: i64, upper: i64) -> Result<i64, SamplingError> {
        uniform::integer(&mut self.engine, lower, upper)
    }

    /// Uniform integer in `[0, upper)`.
    #[inline]
    pub fn integer_below(&mut self, upper: i64) -> Result<i64, SamplingError> {
        uniform::integer_below(&mut self.engine, upper)
    }

    /// Uniform real in `[0, 1)`.
    #[inline]
    pub fn unit_real(&mut self) -> f64 {
        uniform::unit_real(&mut self.engine)
    }

    /// Uniform real in `[lower, upper)`.
    pub fn real(&mut self, lower: f64, upper: f64) -> Result<f64, SamplingError> {
        uniform::real(&mut self.engine, lower, upper, self.config.max_rejections)
    }

    /// Uniform real in `[0, upper)`.
    pub fn real_below(&mut self, upper: f64) -> Result<f64, SamplingError> {
        uniform::real_below(&mut self.engine, upper, self.config.max_rejections)
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    #[inline]
    pub(crate) fn index(&mut self, len: usize) -> usize {
        uniform::lemire(&mut self.engine, len as u64) as usize
    }

    // ------------------------------------------------------------------
    // Distributions
    // ------------------------------------------------------------------

    /// Normal variate with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, stddev: f64) -> Result<f64, SamplingError> {
        let dist = Normal::new(mean, stddev)?;
        Ok(self.sample(&dist))
    }

    /// Normal variate conditioned on `[lower, upper)`.
    pub fn normal_in(
        &mut self,
        lower: f64,
        upper: f64,
        mean: f64,
        stddev: f64,
    ) -> Result<f64, SamplingError> {
        let dist = Normal::new(mean, stddev)?;
        dist.sample_within(&mut self.engine, lower, upper, self.config.max_rejections)
    }

    /// Exponential variate with rate `lambda`.
    pub fn exponential(&mut self, lambda: f64) -> Result<f64, SamplingError> {
        let dist = Exponential::new(lambda)?;
        Ok(self.sample(&dist))
    }

    /// `lower` plus an exponential variate, conditioned on being below `upper`.
    pub fn exponential_in(&mut self, lower: f64, upper: f64, lambda: f64) -> Result<f64, SamplingError> {
        let dist = Exponential::new(lambda)?;
        dist.sample_within(&mut self.engine, lower, upper, self.config.max_rejections)
    }

    /// Number of failures before the first success with probability `p`.
    pub fn geometric(&mut self, p: f64) -> Result<i64, SamplingError> {
        let dist = Geometric::new(p)?;
        Ok(self.sample(&dist))
    }

    /// `lower` plus a geometric variate, conditioned on being below `upper`.
    pub fn geometric_in(&mut self, lower: i64, upper: i64, p: f64) -> Result<i64, SamplingError> {
        let dist = Geometric::new(p)?;
        dist.sample_within(&mut self.engine, lower, upper, self.config.max_rejections)
    }

    /// Number of successes in `n` trials with probability `p`.
    pub fn binomial(&mut self, n: i64, p: f64) -> Result<i64, SamplingError> {
        let dist = Binomial::new(n, p)?;
        Ok(self.sample(&dist))
    }

    /// Binomial variate conditioned on `[lower, upper)`.
    pub fn binomial_in(&mut self, lower: i64, upper: i64, n: i64, p: f64) -> Result<i64, SamplingError> {
        let dist = Binomial::new(n, p)?;
        dist.sample_within(&mut self.engine, lower, upper, self.config.max_rejections)
    }

    /// Maximum of `n` uniform integers in `[lower, upper)`.
    pub fn maximum(&mut self, lower: i64, upper: i64, n: i64) -> Result<i64, SamplingError> {
        distributions::maximum(&mut self.engine, lower, upper, n)
    }

    /// Minimum of `n` uniform integers in `[lower, upper)`.
    pub fn minimum(&mut self, lower: i64, upper: i64, n: i64) -> Result<i64, SamplingError> {
        distributions::minimum(&mut self.engine, lower, upper, n)
    }

    /// Maximum for positive `n`, minimum of `|n|` draws for negative `n`.
    pub fn minmax(&mut self, lower: i64, upper: i64, n: i64) -> Result<i64, SamplingError> {
        distributions::minmax(&mut self.engine, lower, upper, n)
    }

    /// Index `i` with probability `weights[i] / sum(weights)`.
    pub fn discrete(&mut self, weights: &[i64]) -> Result<usize, SamplingError> {
        let dist = Discrete::new(weights)?;
        Ok(self.sample(&dist))
    }

    /// Draws from any [`rand_distr::Distribution`].
    #[inline]
    pub fn sample<T, D: rand_distr::Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(&mut self.engine)
    }
}

impl<E: RngCore> RngCore for Sampler<E> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.engine.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.engine.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.engine.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.engine.try_fill_bytes(dest)
    }
}
