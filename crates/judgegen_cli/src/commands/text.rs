//! String commands: random strings and balanced bracket sequences.

use std::io::Write;

use judgegen_sampling::combinatorics::alphabet;
use judgegen_sampling::Sampler;
use rand_core::RngCore;
use tracing::info;

use crate::{CliError, Result};

/// Resolves a named character set, falling back to the literal characters.
pub fn resolve_alphabet(name: &str) -> &str {
    match name {
        "letter" => alphabet::LETTER,
        "upper" => alphabet::UPPER,
        "lower" => alphabet::LOWER,
        "vowel" => alphabet::VOWEL,
        "upper-vowel" => alphabet::UPPER_VOWELS,
        "lower-vowel" => alphabet::LOWER_VOWELS,
        "consonant" => alphabet::CONSONANT,
        "upper-consonant" => alphabet::UPPER_CONSONANT,
        "lower-consonant" => alphabet::LOWER_CONSONANT,
        "alnum" => alphabet::ALPHA_NUMERIC,
        "upper-alnum" => alphabet::UPPER_ALPHA_NUMERIC,
        "lower-alnum" => alphabet::LOWER_ALPHA_NUMERIC,
        "digits" => alphabet::DIGITS,
        "brackets" => alphabet::BRACKETS,
        literal => literal,
    }
}

/// Run the string command
pub fn run_string<E: RngCore>(
    sampler: &mut Sampler<E>,
    length: i64,
    alphabet: &str,
    out: &mut impl Write,
) -> Result<()> {
    let chars = resolve_alphabet(alphabet);
    info!(length, alphabet = chars, "generating string");
    let s = sampler.random_string(length, chars)?;
    writeln!(out, "{}", length)?;
    writeln!(out, "{}", s)?;
    Ok(())
}

/// Run the brackets command
pub fn run_brackets<E: RngCore>(
    sampler: &mut Sampler<E>,
    pairs: i64,
    open: char,
    close: char,
    out: &mut impl Write,
) -> Result<()> {
    if open == close {
        return Err(CliError::InvalidArgument(format!(
            "opening and closing bracket must differ, both are '{}'",
            open
        )));
    }
    info!(pairs, %open, %close, "generating bracket sequence");
    let s = sampler.bracket_sequence_with(pairs, open, close)?;
    writeln!(out, "{}", 2 * pairs)?;
    writeln!(out, "{}", s)?;
    Ok(())
}
