//! Value types shared by every layer of the engine.
//!
//! This module provides:
//! - `point`: The lattice [`Point`] used by all geometric operations
//! - `error`: The [`SamplingError`] taxonomy returned by every fallible operation
//!
//! # Re-exports
//!
//! [`Point`], [`MAX_COORDINATE`] and [`SamplingError`] are re-exported at this
//! module level.

pub mod error;
pub mod point;

pub use error::SamplingError;
pub use point::{Point, MAX_COORDINATE};
