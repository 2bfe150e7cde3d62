//! Exact integer mathematics used by the generators.
//!
//! ## Modules
//!
//! - [`number_theory`]: modular arithmetic, deterministic Miller-Rabin
//!   primality and segmented-sieve prime enumeration
//! - [`geometry`]: lattice vector products, convex hull and polygon oracles
//!
//! Everything here is a pure function of its inputs; no randomness is
//! consumed at this layer.

pub mod geometry;
pub mod number_theory;
