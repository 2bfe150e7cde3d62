//! Permutation command.

use std::io::Write;

use judgegen_sampling::Sampler;
use rand_core::RngCore;
use tracing::info;

use super::write_values;
use crate::{CliError, Result};

/// Run the perm command
///
/// With `cycles` the permutation has exactly that cycle structure and the
/// lengths must add up to `n`. With `fixed` every listed value maps to
/// itself. The two constraints cannot be combined.
pub fn run<E: RngCore>(
    sampler: &mut Sampler<E>,
    n: i64,
    offset: i64,
    cycles: &[i64],
    fixed: &[i64],
    out: &mut impl Write,
) -> Result<()> {
    info!(n, offset, cycles = cycles.len(), fixed = fixed.len(), "generating permutation");
    let perm = match (cycles.is_empty(), fixed.is_empty()) {
        (true, true) => sampler.permutation(n, offset)?,
        (false, true) => {
            let total: i64 = cycles.iter().sum();
            if total != n {
                return Err(CliError::InvalidArgument(format!(
                    "cycle lengths add up to {}, expected {}",
                    total, n
                )));
            }
            sampler.permutation_with_cycles(cycles, offset)?
        }
        (true, false) => sampler.permutation_with_fixed_points(n, fixed, offset)?,
        (false, false) => {
            return Err(CliError::InvalidArgument(
                "--cycles and --fixed cannot be combined".to_string(),
            ))
        }
    };
    write_values(out, &perm)
}
