//! Sampler configuration types.

/// Retry budgets and memory caps shared by every sampling operation.
///
/// Every rejection loop in the engine is bounded by one of these budgets.
/// When a budget runs out the operation returns
/// `SamplingError::RetryBudgetExhausted` instead of spinning forever.
///
/// # Example
///
/// ```
/// use judgegen_sampling::SamplerConfig;
///
/// // Use default configuration
/// let config = SamplerConfig::default();
/// assert!(config.max_rejections >= 1_000);
///
/// // Custom configuration
/// let custom = SamplerConfig {
///     max_rejections: 50,
///     ..SamplerConfig::default()
/// };
/// assert_eq!(custom.max_rejections, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplerConfig {
    /// Maximum draws of a bounded distribution (`normal_in`, `binomial_in`,
    /// `real`, ...) before giving up.
    pub max_rejections: usize,

    /// Upper cap on candidate draws in `prime`.
    ///
    /// The effective budget is the smaller of this cap and a bound derived
    /// from the expected prime density of the range.
    pub max_prime_trials: usize,

    /// Largest window `primes` will sieve.
    ///
    /// Wider requests fail with `SamplingError::RangeTooLarge`.
    pub sieve_window: i64,

    /// Maximum attempts of the polygon constructions.
    pub max_polygon_attempts: usize,
}

impl Default for SamplerConfig {
    /// Create a default configuration with sensible values.
    ///
    /// Default values:
    /// - `max_rejections`: 1 000 000
    /// - `max_prime_trials`: 1 000 000
    /// - `sieve_window`: 2^30 - 1
    /// - `max_polygon_attempts`: 10 000
    fn default() -> Self {
        Self {
            max_rejections: 1_000_000,
            max_prime_trials: 1_000_000,
            sieve_window: 0x3FFF_FFFF,
            max_polygon_attempts: 10_000,
        }
    }
}

impl SamplerConfig {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if any budget is zero or `sieve_window` is not positive.
    ///
    /// # Example
    ///
    /// ```
    /// use judgegen_sampling::SamplerConfig;
    ///
    /// let config = SamplerConfig::new(500, 2_000, 1 << 20, 100);
    /// assert_eq!(config.sieve_window, 1 << 20);
    /// ```
    pub fn new(
        max_rejections: usize,
        max_prime_trials: usize,
        sieve_window: i64,
        max_polygon_attempts: usize,
    ) -> Self {
        assert!(max_rejections > 0, "max_rejections must be > 0");
        assert!(max_prime_trials > 0, "max_prime_trials must be > 0");
        assert!(sieve_window > 0, "sieve_window must be positive");
        assert!(max_polygon_attempts > 0, "max_polygon_attempts must be > 0");
        Self {
            max_rejections,
            max_prime_trials,
            sieve_window,
            max_polygon_attempts,
        }
    }

    /// Create a configuration with tight budgets.
    ///
    /// Intended for tests that must fail fast on impossible requests.
    pub fn strict() -> Self {
        Self {
            max_rejections: 10_000,
            max_prime_trials: 10_000,
            sieve_window: 1 << 24,
            max_polygon_attempts: 100,
        }
    }

    /// Create a configuration with generous budgets.
    ///
    /// For large generators where a rare long rejection streak must not
    /// abort the run.
    pub fn relaxed() -> Self {
        Self {
            max_rejections: 100_000_000,
            max_prime_trials: 100_000_000,
            sieve_window: 0x3FFF_FFFF,
            max_polygon_attempts: 1_000_000,
        }
    }

    /// Whether every field holds a usable value.
    ///
    /// Configurations deserialised from files bypass [`SamplerConfig::new`],
    /// so callers loading them should check this.
    pub fn is_valid(&self) -> bool {
        self.max_rejections > 0
            && self.max_prime_trials > 0
            && self.sieve_window > 0
            && self.max_polygon_attempts > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SamplerConfig::default();
        assert_eq!(config.max_rejections, 1_000_000);
        assert_eq!(config.sieve_window, 0x3FFF_FFFF);
        assert!(config.is_valid());
    }

    #[test]
    fn test_new_config() {
        let config = SamplerConfig::new(7, 8, 9, 10);
        assert_eq!(config.max_rejections, 7);
        assert_eq!(config.max_prime_trials, 8);
        assert_eq!(config.sieve_window, 9);
        assert_eq!(config.max_polygon_attempts, 10);
    }

    #[test]
    #[should_panic(expected = "max_rejections must be > 0")]
    fn test_new_config_zero_rejections_panics() {
        let _ = SamplerConfig::new(0, 1, 1, 1);
    }

    #[test]
    #[should_panic(expected = "sieve_window must be positive")]
    fn test_new_config_negative_window_panics() {
        let _ = SamplerConfig::new(1, 1, -5, 1);
    }

    #[test]
    fn test_presets_are_ordered() {
        let strict = SamplerConfig::strict();
        let relaxed = SamplerConfig::relaxed();
        assert!(strict.max_rejections < relaxed.max_rejections);
        assert!(strict.max_polygon_attempts < relaxed.max_polygon_attempts);
        assert!(strict.is_valid() && relaxed.is_valid());
    }

    #[test]
    fn test_is_valid_rejects_zero_fields() {
        let config = SamplerConfig {
            max_polygon_attempts: 0,
            ..SamplerConfig::default()
        };
        assert!(!config.is_valid());
    }
}
