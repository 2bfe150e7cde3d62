//! Property-based tests for the structured generators.

use std::collections::BTreeSet;

use judgegen_core::math::geometry::{cross3, is_convex, is_simple};
use judgegen_core::math::number_theory::is_prime;
use judgegen_core::types::Point;
use judgegen_sampling::Sampler;
use proptest::prelude::*;

fn within(points: &[Point], dim_x: i64, dim_y: i64) -> bool {
    points.iter().all(|p| p.x.abs() < dim_x && p.y.abs() < dim_y)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_convex_polygon_properties(seed: u64, n in 3i64..40, dim_x in 8i64..200, dim_y in 8i64..200) {
        prop_assume!(n <= 2 * (dim_x + dim_y));
        let mut sampler = Sampler::new(seed);
        let polygon = sampler.convex_polygon(n, dim_x, dim_y).unwrap();
        prop_assert_eq!(polygon.len(), n as usize);
        prop_assert!(within(&polygon, dim_x, dim_y));
        prop_assert!(is_convex(&polygon).unwrap());
        prop_assert_eq!(polygon.iter().map(|p| p.x).max(), Some(dim_x - 1));
        prop_assert_eq!(polygon.iter().map(|p| p.y).max(), Some(dim_y - 1));
    }

    #[test]
    fn test_simple_polygon_properties(seed: u64, n in 3i64..20, dim in 90i64..1000) {
        let mut sampler = Sampler::new(seed);
        let polygon = sampler.simple_polygon(n, dim).unwrap();
        prop_assert_eq!(polygon.len(), n as usize);
        prop_assert!(within(&polygon, dim, dim));
        let unique: BTreeSet<Point> = polygon.iter().copied().collect();
        prop_assert_eq!(unique.len(), polygon.len());
        prop_assert!(is_simple(&polygon).unwrap());
    }

    #[test]
    fn test_non_collinear_points_properties(seed: u64, n in 0i64..25, dim in 30i64..1000) {
        let mut sampler = Sampler::new(seed);
        let points = sampler.non_collinear_points(n, dim).unwrap();
        prop_assert_eq!(points.len(), n as usize);
        prop_assert!(within(&points, dim, dim));
        for i in 0..points.len() {
            for j in i + 1..points.len() {
                for k in j + 1..points.len() {
                    prop_assert_ne!(cross3(points[i], points[j], points[k]), 0);
                }
            }
        }
    }

    #[test]
    fn test_prime_in_range(seed: u64, lower in 0i64..1_000_000, width in 1_000i64..10_000) {
        let mut sampler = Sampler::new(seed);
        let p = sampler.prime(lower, lower + width).unwrap();
        prop_assert!(is_prime(p));
        prop_assert!((lower..lower + width).contains(&p));
    }

    #[test]
    fn test_partition_properties(seed: u64, k in 1i64..20, min in 0i64..5, extra in 0i64..100) {
        let n = k * min + extra;
        prop_assume!(n > 0);
        let mut sampler = Sampler::new(seed);
        let parts = sampler.partition(n, k, min).unwrap();
        prop_assert_eq!(parts.len(), k as usize);
        prop_assert_eq!(parts.iter().sum::<i64>(), n);
        prop_assert!(parts.iter().all(|&x| x >= min));
    }

    #[test]
    fn test_bracket_sequence_balanced(seed: u64, n in 0i64..200) {
        let mut sampler = Sampler::new(seed);
        let s = sampler.bracket_sequence(n).unwrap();
        prop_assert_eq!(s.len(), 2 * n as usize);
        let mut depth = 0i64;
        for c in s.chars() {
            depth += if c == '(' { 1 } else { -1 };
            prop_assert!(depth >= 0);
        }
        prop_assert_eq!(depth, 0);
    }

    #[test]
    fn test_permutation_with_cycles_structure(seed: u64, lengths in prop::collection::vec(1i64..6, 1..6)) {
        let mut sampler = Sampler::new(seed);
        let perm = sampler.permutation_with_cycles(&lengths, 0).unwrap();
        let mut seen = vec![false; perm.len()];
        let mut found = Vec::new();
        for start in 0..perm.len() {
            if seen[start] {
                continue;
            }
            let mut len = 0;
            let mut i = start;
            while !seen[i] {
                seen[i] = true;
                i = perm[i] as usize;
                len += 1;
            }
            found.push(len);
        }
        let mut expected = lengths.clone();
        expected.sort_unstable();
        found.sort_unstable();
        prop_assert_eq!(found, expected);
    }
}
