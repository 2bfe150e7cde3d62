//! Geometry commands: convex polygons, simple polygons and point sets.

use std::io::Write;

use judgegen_sampling::Sampler;
use rand_core::RngCore;
use tracing::info;

use super::write_points;
use crate::Result;

/// Run the convex command
pub fn run_convex<E: RngCore>(
    sampler: &mut Sampler<E>,
    n: i64,
    dim_x: i64,
    dim_y: i64,
    out: &mut impl Write,
) -> Result<()> {
    info!(n, dim_x, dim_y, "generating convex polygon");
    let polygon = sampler.convex_polygon(n, dim_x, dim_y)?;
    write_points(out, &polygon)
}

/// Run the polygon command
pub fn run_simple<E: RngCore>(
    sampler: &mut Sampler<E>,
    n: i64,
    dim: i64,
    out: &mut impl Write,
) -> Result<()> {
    info!(n, dim, "generating simple polygon");
    let polygon = sampler.simple_polygon(n, dim)?;
    write_points(out, &polygon)
}

/// Run the points command
pub fn run_points<E: RngCore>(
    sampler: &mut Sampler<E>,
    n: i64,
    dim: i64,
    out: &mut impl Write,
) -> Result<()> {
    info!(n, dim, "generating points in general position");
    let points = sampler.non_collinear_points(n, dim)?;
    write_points(out, &points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use judgegen_core::math::geometry::{is_convex, is_simple};
    use judgegen_core::types::Point;

    fn points(buf: Vec<u8>) -> Vec<Point> {
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let n: usize = lines.next().unwrap().parse().unwrap();
        let res: Vec<Point> = lines
            .map(|line| {
                let mut it = line.split_whitespace().map(|v| v.parse::<i64>().unwrap());
                Point::new(it.next().unwrap(), it.next().unwrap())
            })
            .collect();
        assert_eq!(res.len(), n);
        res
    }

    #[test]
    fn test_convex_output() {
        let mut sampler = Sampler::new(11);
        let mut buf = Vec::new();
        run_convex(&mut sampler, 12, 50, 30, &mut buf).unwrap();
        let polygon = points(buf);
        assert_eq!(polygon.len(), 12);
        assert!(is_convex(&polygon).unwrap());
    }

    #[test]
    fn test_simple_output() {
        let mut sampler = Sampler::new(12);
        let mut buf = Vec::new();
        run_simple(&mut sampler, 15, 100, &mut buf).unwrap();
        assert!(is_simple(&points(buf)).unwrap());
    }

    #[test]
    fn test_points_output() {
        let mut sampler = Sampler::new(13);
        let mut buf = Vec::new();
        run_points(&mut sampler, 10, 50, &mut buf).unwrap();
        assert_eq!(points(buf).len(), 10);
    }

    #[test]
    fn test_convex_too_many_vertices() {
        let mut sampler = Sampler::new(14);
        let err = run_convex(&mut sampler, 100, 3, 3, &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
