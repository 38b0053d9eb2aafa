//! # Equal-time sectors (Kepler's second law)
//!
//! Splits one period of an elliptic orbit into `count` equal time intervals and
//! builds, for each interval, the polygon swept by the radius vector: from the
//! focus, along the arc travelled during the interval, and back to the focus.
//!
//! Equal times sweep equal areas, so every sector returned for a given shape
//! has the same area up to the chord approximation of the arc.
//!
//! Sectors are only defined for bound orbits; parabolic and hyperbolic shapes
//! yield no sectors.
use itertools::Itertools;
use nalgebra::Vector2;
use smallvec::SmallVec;

use crate::{
    constants::SECTOR_ARC_SAMPLES,
    orbit_type::OrbitShape,
    propagator::OrbitPropagator,
};

/// Closed boundary polygon of one sector (focus, arc points, focus).
pub type SectorBoundary = SmallVec<[Vector2<f64>; 16]>;

/// Area swept by the radius vector over one equal-time interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    /// Position at the start of the interval.
    pub start_point: Vector2<f64>,
    /// Position at the end of the interval.
    pub end_point: Vector2<f64>,
    /// Focus → arc → focus; the first and last vertices are the origin.
    pub boundary: SectorBoundary,
}

impl Sector {
    /// Signed polygon area (shoelace formula), positive for prograde motion.
    pub fn area(&self) -> f64 {
        0.5 * self
            .boundary
            .iter()
            .tuple_windows()
            .map(|(p, n)| p.x * n.y - n.x * p.y)
            .sum::<f64>()
    }
}

/// Partition one period of `shape` into `count` equal-time sectors.
///
/// Each arc is sampled at [`SECTOR_ARC_SAMPLES`] equal sub-steps of its
/// interval, both endpoints included.
///
/// Return
/// ----------
/// * `count` sectors for an elliptic shape, in time order starting at periapsis.
/// * An empty vector for non-elliptic shapes or `count == 0`.
pub fn sectors(shape: &OrbitShape, count: usize) -> Vec<Sector> {
    sectors_with_samples(shape, count, SECTOR_ARC_SAMPLES)
}

/// Same as [`sectors`] with a custom number of arc sub-steps (clamped to at least 1).
pub fn sectors_with_samples(shape: &OrbitShape, count: usize, arc_samples: usize) -> Vec<Sector> {
    let Some(period) = shape.period() else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }

    let propagator = OrbitPropagator::new(shape);
    let arc_samples = arc_samples.max(1);
    let dt = period / count as f64;

    (0..count)
        .map(|i| {
            let t_start = i as f64 * dt;

            let mut boundary = SectorBoundary::with_capacity(arc_samples + 3);
            boundary.push(Vector2::zeros());
            boundary.extend((0..=arc_samples).map(|j| {
                let t = t_start + dt * (j as f64 / arc_samples as f64);
                propagator.state(t).position()
            }));
            boundary.push(Vector2::zeros());

            Sector {
                start_point: boundary[1],
                end_point: boundary[arc_samples + 1],
                boundary,
            }
        })
        .collect()
}

#[cfg(test)]
mod swept_area_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sector_layout() {
        let shape = OrbitShape::new(5.0, 0.5, 10.0).unwrap();
        let list = sectors(&shape, 12);
        assert_eq!(list.len(), 12);

        for sector in &list {
            assert_eq!(sector.boundary.len(), SECTOR_ARC_SAMPLES + 3);
            assert_eq!(sector.boundary[0], Vector2::zeros());
            assert_eq!(sector.boundary[SECTOR_ARC_SAMPLES + 2], Vector2::zeros());
        }

        // Consecutive sectors share their boundary point.
        for (a, b) in list.iter().tuple_windows() {
            assert_relative_eq!(a.end_point.x, b.start_point.x, epsilon = 1e-9);
            assert_relative_eq!(a.end_point.y, b.start_point.y, epsilon = 1e-9);
        }

        // The first sector starts at periapsis and the last one closes the orbit.
        assert_relative_eq!(list[0].start_point.x, 2.5, epsilon = 1e-12);
        assert_relative_eq!(list[11].end_point.x, 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_circular_sectors_are_equal() {
        let shape = OrbitShape::new(5.0, 0.0, 10.0).unwrap();
        let list = sectors_with_samples(&shape, 8, 50);
        let expected = std::f64::consts::PI * 25.0 / 8.0;
        for sector in &list {
            assert_relative_eq!(sector.area(), expected, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_open_orbits_have_no_sectors() {
        let par = OrbitShape::new(5.0, 1.0, 10.0).unwrap();
        let hyp = OrbitShape::new(5.0, 1.3, 10.0).unwrap();
        assert!(sectors(&par, 12).is_empty());
        assert!(sectors(&hyp, 12).is_empty());

        let ell = OrbitShape::new(5.0, 0.5, 10.0).unwrap();
        assert!(sectors(&ell, 0).is_empty());
    }
}
