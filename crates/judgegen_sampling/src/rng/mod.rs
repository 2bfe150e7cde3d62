//! # Bit Generators
//!
//! This module provides the deterministic 64-bit engines every sampler draws
//! from. Both are implemented with wrapping unsigned arithmetic only, so a
//! given seed yields the same sequence on every compiler, platform and
//! pointer width.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Seeding is a pure function of one `u64`
//! - **Pluggability**: Engines implement [`rand_core::RngCore`] and
//!   [`rand_core::SeedableRng`]; everything above is generic over the engine
//! - **Static dispatch**: Samplers are monomorphised over the engine type
//!
//! ## Module Structure
//!
//! - [`xoshiro`]: xoshiro256** with π-derived default state and jump-ahead
//! - [`mt64`]: 64-bit Mersenne Twister (MT19937-64)
//!
//! ## Usage Example
//!
//! ```rust
//! use judgegen_sampling::rng::{Mt19937_64, Xoshiro256StarStar};
//! use rand_core::{RngCore, SeedableRng};
//!
//! let mut xs = Xoshiro256StarStar::seed_from_u64(123456789);
//! assert_eq!(xs.next_u64(), 15488339681858015917);
//!
//! let mut mt = Mt19937_64::seed_from_u64(5489);
//! assert_eq!(mt.next_u64(), 14514284786278117030);
//! ```

pub mod mt64;
pub mod xoshiro;

pub use mt64::Mt19937_64;
pub use xoshiro::Xoshiro256StarStar;

/// Seed used when a sampler is built without one.
pub const DEFAULT_SEED: u64 = 3141592653589793238;

#[cfg(test)]
mod tests;
