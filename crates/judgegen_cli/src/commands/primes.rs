//! Prime commands: random primes and sieved ranges.

use std::io::Write;

use judgegen_sampling::Sampler;
use rand_core::RngCore;
use tracing::info;

use super::write_values;
use crate::{CliError, Result};

/// Run the prime command: `count` independent random primes in `[lower, upper)`.
pub fn run_prime<E: RngCore>(
    sampler: &mut Sampler<E>,
    count: i64,
    lower: i64,
    upper: i64,
    out: &mut impl Write,
) -> Result<()> {
    if count < 0 {
        return Err(CliError::InvalidArgument(format!(
            "count must be non negative, got {}",
            count
        )));
    }
    info!(count, lower, upper, "sampling primes");
    let primes = (0..count)
        .map(|_| sampler.prime(lower, upper))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    write_values(out, &primes)
}

/// Run the primes command: every prime in `[lower, upper)`.
pub fn run_primes<E: RngCore>(
    sampler: &Sampler<E>,
    lower: i64,
    upper: i64,
    out: &mut impl Write,
) -> Result<()> {
    info!(lower, upper, "sieving primes");
    let primes = sampler.primes(lower, upper)?;
    write_values(out, &primes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use judgegen_core::math::number_theory::is_prime;
    use judgegen_sampling::SamplerConfig;

    #[test]
    fn test_prime_output() {
        let mut sampler = Sampler::new(8);
        let mut buf = Vec::new();
        run_prime(&mut sampler, 5, 1_000, 2_000, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("5"));
        let values: Vec<i64> = lines
            .next()
            .unwrap()
            .split_whitespace()
            .map(|v| v.parse().unwrap())
            .collect();
        assert!(values.iter().all(|&p| is_prime(p) && (1_000..2_000).contains(&p)));
    }

    #[test]
    fn test_prime_empty_range() {
        let mut sampler = Sampler::new(8);
        let err = run_prime(&mut sampler, 1, 24, 29, &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_primes_listing() {
        let sampler = Sampler::new(0);
        let mut buf = Vec::new();
        run_primes(&sampler, 10, 30, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "6\n11 13 17 19 23 29\n");
    }

    #[test]
    fn test_primes_window_cap() {
        let config = SamplerConfig {
            sieve_window: 100,
            ..SamplerConfig::default()
        };
        let sampler = Sampler::new(0).with_config(config);
        let err = run_primes(&sampler, 0, 1_000, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Sampling(_)));
    }
}
