//! CLI command implementations
//!
//! Each submodule implements one family of generators. Every command writes
//! plain whitespace-separated text in the usual test-file layout: a count on
//! the first line followed by the data.

use std::io::Write;

use judgegen_core::types::Point;

use crate::Result;

pub mod geometry;
pub mod permutation;
pub mod primes;
pub mod sequence;
pub mod text;

/// Writes `values.len()` on one line and the values on the next.
pub fn write_values(out: &mut impl Write, values: &[i64]) -> Result<()> {
    writeln!(out, "{}", values.len())?;
    write_row(out, values)
}

/// Writes the values space-separated on a single line.
pub fn write_row(out: &mut impl Write, values: &[i64]) -> Result<()> {
    let mut first = true;
    for value in values {
        if !first {
            write!(out, " ")?;
        }
        write!(out, "{}", value)?;
        first = false;
    }
    writeln!(out)?;
    Ok(())
}

/// Writes `points.len()` on one line and one `x y` pair per line.
pub fn write_points(out: &mut impl Write, points: &[Point]) -> Result<()> {
    writeln!(out, "{}", points.len())?;
    for point in points {
        writeln!(out, "{}", point)?;
    }
    Ok(())
}
