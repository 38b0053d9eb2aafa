#![allow(dead_code)]

use approx::assert_relative_eq;
use nalgebra::Vector2;
use orbitview::orbit_type::OrbitShape;
use orbitview::propagator::State;

pub const MU: f64 = 10.0;

pub fn shape(size_param: f64, eccentricity: f64) -> OrbitShape {
    OrbitShape::new(size_param, eccentricity, MU).unwrap()
}

pub fn assert_state_close(actual: &State, expected: &State, epsilon: f64) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_relative_eq!(actual.vx, expected.vx, epsilon = epsilon);
    assert_relative_eq!(actual.vy, expected.vy, epsilon = epsilon);
    assert_relative_eq!(actual.r, expected.r, epsilon = epsilon);
}

pub fn assert_point_close(actual: &Vector2<f64>, expected: &Vector2<f64>, epsilon: f64) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
}

/// Evenly spaced times in `[start, end]`.
pub fn time_grid(start: f64, end: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| start + (end - start) * i as f64 / (count - 1) as f64)
        .collect()
}

/// Eccentric anomaly by bisection on `[M - e, M + e]`, with `M` wrapped into `[-π, π)`.
pub fn bisect_eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let pi = std::f64::consts::PI;
    let m = (mean_anomaly + pi).rem_euclid(2.0 * pi) - pi;
    let (mut lo, mut hi) = (m - e, m + e);
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if mid - e * mid.sin() - m > 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    0.5 * (lo + hi)
}
