//! Combinatorial generators: sequences, permutations, partitions, strings.
//!
//! All generators consume entropy in a fixed order. Lookups use ordered
//! maps so that no generator depends on hash iteration order.

use std::collections::{BTreeMap, BTreeSet};

use judgegen_core::types::error::ensure;
use judgegen_core::types::SamplingError;
use rand_core::RngCore;

use crate::sampler::Sampler;

/// Character sets for [`Sampler::random_string`].
pub mod alphabet {
    /// Upper- and lower-case ASCII letters.
    pub const LETTER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    /// Upper-case ASCII letters.
    pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    /// Lower-case ASCII letters.
    pub const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
    /// Vowels of both cases.
    pub const VOWEL: &str = "AEIOUaeiou";
    /// Upper-case vowels.
    pub const UPPER_VOWELS: &str = "AEIOU";
    /// Lower-case vowels.
    pub const LOWER_VOWELS: &str = "aeiou";
    /// Consonants of both cases.
    pub const CONSONANT: &str = "BCDFGHJKLMNPQRSTVWXYZbcdfghjklmnpqrstvwxyz";
    /// Upper-case consonants.
    pub const UPPER_CONSONANT: &str = "BCDFGHJKLMNPQRSTVWXYZ";
    /// Lower-case consonants.
    pub const LOWER_CONSONANT: &str = "bcdfghjklmnpqrstvwxyz";
    /// Digits and letters of both cases.
    pub const ALPHA_NUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    /// Digits and upper-case letters.
    pub const UPPER_ALPHA_NUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    /// Digits and lower-case letters.
    pub const LOWER_ALPHA_NUMERIC: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
    /// Decimal digits.
    pub const DIGITS: &str = "0123456789";
    /// Opening and closing brackets of four kinds.
    pub const BRACKETS: &str = "()[]{}<>";
}

/// Largest length accepted by [`Sampler::random_string`].
const MAX_STRING_LEN: i64 = 0xFFFF_FFFF;
/// Largest pair count accepted by [`Sampler::bracket_sequence`].
const MAX_BRACKET_PAIRS: i64 = 0x7FFF_FFFF;

fn check_count(operation: &'static str, count: i64) -> Result<usize, SamplingError> {
    ensure(count >= 0, operation, "count must be non negative")?;
    usize::try_from(count).map_err(|_| SamplingError::invalid_argument(operation, "count too large"))
}

impl<E: RngCore> Sampler<E> {
    /// `count` independent uniform integers in `[lower, upper)`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `count < 0` or `lower >= upper`.
    pub fn multiple(&mut self, count: i64, lower: i64, upper: i64) -> Result<Vec<i64>, SamplingError> {
        let count = check_count("multiple", count)?;
        ensure(lower < upper, "multiple", "lower must be less than upper")?;
        (0..count).map(|_| self.integer(lower, upper)).collect()
    }

    /// Uniformly chosen element of `items`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `items` is empty.
    pub fn select<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, SamplingError> {
        ensure(!items.is_empty(), "select", "cannot select from an empty slice")?;
        Ok(&items[self.index(items.len())])
    }

    /// Shuffles `items` in place with a Fisher-Yates pass from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    /// Rotates `items` left by a uniform amount and returns that amount.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `items` is empty.
    pub fn rotate<T>(&mut self, items: &mut [T]) -> Result<usize, SamplingError> {
        ensure(!items.is_empty(), "rotate", "cannot rotate an empty slice")?;
        let rotation = self.index(items.len());
        items.rotate_left(rotation);
        Ok(rotation)
    }

    /// `count` pairwise distinct integers from `[lower, upper)`, in random
    /// order.
    ///
    /// Runs in `O(count log count)` time and memory, independent of the
    /// width of the range.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `count < 0` or the range holds fewer than
    /// `count` values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use judgegen_sampling::Sampler;
    ///
    /// let mut sampler = Sampler::new(8);
    /// let values = sampler.distinct(5, 0, 1_000_000_000_000).unwrap();
    /// let mut dedup = values.clone();
    /// dedup.sort();
    /// dedup.dedup();
    /// assert_eq!(dedup.len(), 5);
    /// ```
    pub fn distinct(&mut self, count: i64, lower: i64, upper: i64) -> Result<Vec<i64>, SamplingError> {
        let n = check_count("distinct", count)?;
        ensure(
            lower.checked_add(count).is_some_and(|end| end <= upper),
            "distinct",
            "upper - lower must be at least count",
        )?;
        // value displaced from each drawn slot
        let mut displaced: BTreeMap<i64, i64> = BTreeMap::new();
        let mut res = Vec::with_capacity(n);
        for i in 0..count {
            let top = upper - i - 1;
            let x = self.integer(lower, upper - i)?;
            res.push(*displaced.get(&x).unwrap_or(&x));
            let replacement = *displaced.get(&top).unwrap_or(&top);
            displaced.insert(x, replacement);
        }
        Ok(res)
    }

    /// Uniformly random permutation of `[offset, offset + n)`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `n < 0` or `offset + n` overflows.
    pub fn permutation(&mut self, n: i64, offset: i64) -> Result<Vec<i64>, SamplingError> {
        check_count("permutation", n)?;
        let end = offset
            .checked_add(n)
            .ok_or_else(|| SamplingError::invalid_argument("permutation", "offset + n overflows"))?;
        let mut res: Vec<i64> = (offset..end).collect();
        self.shuffle(&mut res);
        Ok(res)
    }

    /// Uniformly random permutation with the given cycle structure.
    ///
    /// `res[i]` is the image of `i - offset`; the permutation decomposes into
    /// disjoint cycles whose lengths are exactly `cycle_lengths`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a cycle length is not positive.
    pub fn permutation_with_cycles(
        &mut self,
        cycle_lengths: &[i64],
        offset: i64,
    ) -> Result<Vec<i64>, SamplingError> {
        let mut total: i64 = 0;
        for &len in cycle_lengths {
            ensure(len > 0, "permutation", "cycle lengths must be positive")?;
            total = total
                .checked_add(len)
                .ok_or_else(|| SamplingError::invalid_argument("permutation", "cycle lengths overflow"))?;
        }
        let order = self.permutation(total, 0)?;
        let mut res = vec![0i64; order.len()];
        let mut start = 0usize;
        for &len in cycle_lengths {
            let cycle = &order[start..start + len as usize];
            for pair in cycle.windows(2) {
                res[pair[0] as usize] = pair[1] + offset;
            }
            res[cycle[cycle.len() - 1] as usize] = cycle[0] + offset;
            start += len as usize;
        }
        Ok(res)
    }

    /// Uniformly random permutation of `[offset, offset + n)` fixing every
    /// value in `fixed`. Other values may or may not be fixed.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `n < 0`
    /// - `StructuralImpossibility` if a fixed point lies outside
    ///   `[offset, offset + n)`
    pub fn permutation_with_fixed_points(
        &mut self,
        n: i64,
        fixed: &[i64],
        offset: i64,
    ) -> Result<Vec<i64>, SamplingError> {
        let len = check_count("permutation", n)?;
        let fixed: BTreeSet<i64> = fixed.iter().copied().collect();
        let mut res: Vec<i64> = (0..n).map(|i| i + offset).collect();
        for &x in &fixed {
            if !x.checked_sub(offset).map_or(false, |i| (0..n).contains(&i)) {
                return Err(SamplingError::impossible("permutation", "fixed point outside of permutation"));
            }
        }
        // the free positions double as the free values
        let slots: Vec<usize> = (0..len).filter(|&i| !fixed.contains(&res[i])).collect();
        let mut values = slots.clone();
        self.shuffle(&mut values);
        for (&slot, value) in slots.iter().zip(values) {
            res[slot] = value as i64 + offset;
        }
        Ok(res)
    }

    /// `count` distinct values of `[lower, upper)` in strictly increasing order.
    pub fn increasing(&mut self, count: i64, lower: i64, upper: i64) -> Result<Vec<i64>, SamplingError> {
        let mut res = self.distinct(count, lower, upper)?;
        res.sort_unstable();
        Ok(res)
    }

    /// `count` distinct values of `[lower, upper)` in strictly decreasing order.
    pub fn decreasing(&mut self, count: i64, lower: i64, upper: i64) -> Result<Vec<i64>, SamplingError> {
        let mut res = self.distinct(count, lower, upper)?;
        res.sort_unstable_by(|a, b| b.cmp(a));
        Ok(res)
    }

    /// `count` values of `[lower, upper)` in non-decreasing order.
    pub fn non_decreasing(&mut self, count: i64, lower: i64, upper: i64) -> Result<Vec<i64>, SamplingError> {
        let mut res = self.multiple(count, lower, upper)?;
        res.sort_unstable();
        Ok(res)
    }

    /// `count` values of `[lower, upper)` in non-increasing order.
    pub fn non_increasing(&mut self, count: i64, lower: i64, upper: i64) -> Result<Vec<i64>, SamplingError> {
        let mut res = self.multiple(count, lower, upper)?;
        res.sort_unstable_by(|a, b| b.cmp(a));
        Ok(res)
    }

    /// Uniformly random ordered partition of `n` into `k` parts, each at
    /// least `min`.
    ///
    /// `min` may be zero or negative.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `n > 0`, `k > 0` and `k * min <= n`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use judgegen_sampling::Sampler;
    ///
    /// let mut sampler = Sampler::new(3);
    /// let parts = sampler.partition(17, 5, 1).unwrap();
    /// assert_eq!(parts.len(), 5);
    /// assert_eq!(parts.iter().sum::<i64>(), 17);
    /// assert!(parts.iter().all(|&x| x >= 1));
    /// ```
    pub fn partition(&mut self, n: i64, k: i64, min: i64) -> Result<Vec<i64>, SamplingError> {
        ensure(n > 0, "partition", "n must be positive")?;
        ensure(k > 0, "partition", "k must be positive")?;
        ensure(min <= 0 || k <= n / min, "partition", "k too large")?;
        let shifted = (min - 1)
            .checked_mul(k)
            .and_then(|shift| n.checked_sub(shift))
            .ok_or_else(|| SamplingError::invalid_argument("partition", "parts overflow"))?;

        let mut cuts = self.increasing(k - 1, 1, shifted)?;
        cuts.push(shifted);
        let mut last = 0;
        for cut in cuts.iter_mut() {
            let part = *cut - last;
            last = *cut;
            *cut = part + min - 1;
        }
        Ok(cuts)
    }

    /// Uniformly random string of length `n` over `alphabet`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `n` is outside `[0, 2^32)` or `alphabet` is empty.
    pub fn random_string(&mut self, n: i64, alphabet: &str) -> Result<String, SamplingError> {
        ensure(
            (0..=MAX_STRING_LEN).contains(&n),
            "random_string",
            "n out of range",
        )?;
        let chars: Vec<char> = alphabet.chars().collect();
        ensure(!chars.is_empty(), "random_string", "alphabet must not be empty")?;
        (0..n).map(|_| self.select(&chars).copied()).collect()
    }

    /// Uniformly random balanced bracket sequence with `n` pairs of `(` and `)`.
    pub fn bracket_sequence(&mut self, n: i64) -> Result<String, SamplingError> {
        self.bracket_sequence_with(n, '(', ')')
    }

    /// Uniformly random balanced bracket sequence with `n` pairs, using the
    /// given bracket characters.
    ///
    /// Each position opens with the probability that a uniformly random
    /// completion of the current prefix opens there, so every balanced
    /// sequence is equally likely.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `n` is outside `[0, 2^31)`.
    pub fn bracket_sequence_with(
        &mut self,
        n: i64,
        open: char,
        close: char,
    ) -> Result<String, SamplingError> {
        ensure(
            (0..=MAX_BRACKET_PAIRS).contains(&n),
            "bracket_sequence",
            "n out of range",
        )?;
        let mut res = String::with_capacity(2 * n as usize);
        let mut diff: i64 = 0;
        for i in 0..2 * n {
            let opened = (i + diff) / 2;
            if self.integer_below((2 * n - i) * (diff + 1))? < (n - opened) * (diff + 2) {
                res.push(open);
                diff += 1;
            } else {
                res.push(close);
                diff -= 1;
            }
        }
        Ok(res)
    }
}
