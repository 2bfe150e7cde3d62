//! Integer sequence commands: `integers` and `partition`.

use std::io::Write;

use clap::ValueEnum;
use judgegen_sampling::Sampler;
use rand_core::RngCore;
use tracing::info;

use super::write_values;
use crate::Result;

/// Ordering constraint on generated integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Order {
    /// Independent values, repeats allowed
    #[default]
    Any,
    /// Pairwise distinct values in random order
    Distinct,
    /// Strictly increasing
    Increasing,
    /// Strictly decreasing
    Decreasing,
    /// Sorted ascending, repeats allowed
    NonDecreasing,
    /// Sorted descending, repeats allowed
    NonIncreasing,
}

/// Run the integers command
pub fn run_integers<E: RngCore>(
    sampler: &mut Sampler<E>,
    count: i64,
    lower: i64,
    upper: i64,
    order: Order,
    out: &mut impl Write,
) -> Result<()> {
    info!(count, lower, upper, ?order, "generating integers");
    let values = match order {
        Order::Any => sampler.multiple(count, lower, upper)?,
        Order::Distinct => sampler.distinct(count, lower, upper)?,
        Order::Increasing => sampler.increasing(count, lower, upper)?,
        Order::Decreasing => sampler.decreasing(count, lower, upper)?,
        Order::NonDecreasing => sampler.non_decreasing(count, lower, upper)?,
        Order::NonIncreasing => sampler.non_increasing(count, lower, upper)?,
    };
    write_values(out, &values)
}

/// Run the partition command
pub fn run_partition<E: RngCore>(
    sampler: &mut Sampler<E>,
    n: i64,
    k: i64,
    min: i64,
    out: &mut impl Write,
) -> Result<()> {
    info!(n, k, min, "generating partition");
    let parts = sampler.partition(n, k, min)?;
    write_values(out, &parts)
}
