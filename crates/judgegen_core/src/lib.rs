//! # judgegen_core: Foundation for the judgegen sampling engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! judgegen_core is the bottom layer of the workspace, providing:
//! - Lattice point type (`types::point`)
//! - Error taxonomy: `SamplingError` (`types::error`)
//! - Number theory: primality, sieving, modular arithmetic (`math::number_theory`)
//! - Geometry: vector products, convex hull, polygon oracles (`math::geometry`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other judgegen_* crates and consumes no
//! randomness. External dependencies are kept minimal:
//! - thiserror: Error derivation
//! - libm: Portable floating-point functions for the convexity oracle
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use judgegen_core::math::geometry::{convex_hull, is_convex};
//! use judgegen_core::math::number_theory::is_prime;
//! use judgegen_core::types::Point;
//!
//! assert!(is_prime(998_244_353));
//!
//! let points: Vec<Point> = vec![(0, 0), (4, 0), (2, 1), (4, 4), (0, 4)]
//!     .into_iter()
//!     .map(Point::from)
//!     .collect();
//! let hull = convex_hull(&points);
//! assert_eq!(hull.len(), 4);
//! assert!(is_convex(&hull).unwrap());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Point` and `SamplingError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
