//! # Orbit curve sampling
//!
//! Discrete point sequences approximating the shape of an orbit, recomputed
//! by the host whenever the shape changes.
//!
//! Each regime is swept along its own native parameter rather than in time,
//! because uniform time steps cluster points around apoapsis and leave the
//! fast periapsis passage under-sampled:
//!
//! * **Elliptic** – true anomaly `ν ∈ [0, 2π]`, closed curve.
//! * **Hyperbolic** – true anomaly `ν ∈ [-0.92·ν∞, +0.92·ν∞]` with
//!   `ν∞ = acos(-1/e)`, open curve kept inside the asymptotes.
//! * **Parabolic** – parabolic anomaly `D ∈ [-6, 6]`, open curve.
use nalgebra::Vector2;

use crate::{
    constants::{
        DEFAULT_ORBIT_SEGMENTS, DPI, HYPERBOLIC_ASYMPTOTE_FRACTION, PARABOLIC_ANOMALY_BOUND,
    },
    orbit_type::{OrbitShape, Regime},
};

/// A sampled orbit outline in the orbital plane.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCurve {
    pub points: Vec<Vector2<f64>>,
    /// `true` when the first and last points coincide (elliptic orbits).
    pub closed: bool,
}

impl OrbitCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<&OrbitShape> for OrbitCurve {
    /// Outline with [`DEFAULT_ORBIT_SEGMENTS`] segments.
    fn from(shape: &OrbitShape) -> Self {
        sample_curve(shape, DEFAULT_ORBIT_SEGMENTS)
    }
}

/// One point of the speed-vs-radius profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSample {
    pub r: f64,
    pub v: f64,
}

/// Point at true anomaly `nu` on the conic `r = p / (1 + e·cos ν)`.
#[inline]
fn polar_point(semi_latus_rectum: f64, e: f64, nu: f64) -> Vector2<f64> {
    let (sin_nu, cos_nu) = nu.sin_cos();
    let r = semi_latus_rectum / (1.0 + e * cos_nu);
    Vector2::new(r * cos_nu, r * sin_nu)
}

/// Uniform grid of `segments + 1` values over `[start, end]`.
#[inline]
fn linspace(start: f64, end: f64, segments: usize) -> impl Iterator<Item = f64> {
    let step = (end - start) / segments as f64;
    (0..=segments).map(move |i| {
        if i == segments {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Sample the outline of `shape`.
///
/// Arguments
/// -----------------
/// * `shape` – Orbit shape to draw.
/// * `segment_count` – Number of segments; clamped to at least 1. The curve has `segment_count + 1` points.
///
/// Return
/// ----------
/// * An [`OrbitCurve`], closed for elliptic shapes and open otherwise.
pub fn sample_curve(shape: &OrbitShape, segment_count: usize) -> OrbitCurve {
    let segments = segment_count.max(1);
    let e = shape.eccentricity();
    let p = shape.semi_latus_rectum();

    match shape.regime() {
        Regime::Elliptic => {
            let mut points: Vec<_> = linspace(0.0, DPI, segments)
                .map(|nu| polar_point(p, e, nu))
                .collect();
            // Close the loop exactly rather than through cos(2π) rounding.
            points[segments] = points[0];
            OrbitCurve {
                points,
                closed: true,
            }
        }
        Regime::Hyperbolic => {
            let max_nu = HYPERBOLIC_ASYMPTOTE_FRACTION * (-1.0 / e).acos();
            OrbitCurve {
                points: linspace(-max_nu, max_nu, segments)
                    .map(|nu| polar_point(p, e, nu))
                    .collect(),
                closed: false,
            }
        }
        Regime::Parabolic => {
            let q = shape.periapsis_distance();
            OrbitCurve {
                points: linspace(-PARABOLIC_ANOMALY_BOUND, PARABOLIC_ANOMALY_BOUND, segments)
                    .map(|d| {
                        let r = q * (1.0 + d * d);
                        let (sin_nu, cos_nu) = (2.0 * d.atan()).sin_cos();
                        Vector2::new(r * cos_nu, r * sin_nu)
                    })
                    .collect(),
                closed: false,
            }
        }
    }
}

/// Speed as a function of radius from periapsis to apoapsis.
///
/// Sweeps the true anomaly over `[0, π]` in `steps` steps and evaluates the
/// vis-viva speed `v = sqrt(mu·(2/r - 1/a))`. Only bound orbits have a finite
/// radius range; the profile is empty for parabolic and hyperbolic shapes.
pub fn speed_profile(shape: &OrbitShape, steps: usize) -> Vec<SpeedSample> {
    if shape.regime() != Regime::Elliptic {
        return Vec::new();
    }
    let e = shape.eccentricity();
    let p = shape.semi_latus_rectum();

    linspace(0.0, std::f64::consts::PI, steps.max(1))
        .map(|nu| {
            let r = p / (1.0 + e * nu.cos());
            SpeedSample {
                r,
                v: shape.vis_viva_speed(r),
            }
        })
        .collect()
}
