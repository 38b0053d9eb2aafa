use nalgebra::Vector2;

use crate::orbit_type::{OrbitShape, Regime};

/// Landmarks of a conic in its orbital plane.
///
/// The attracting body sits at the origin (first focus) and periapsis lies on
/// the `+x` axis. Points that do not exist for a regime are `None`:
///
/// | Landmark        | Elliptic      | Parabolic | Hyperbolic    |
/// |-----------------|---------------|-----------|---------------|
/// | periapsis       | `(q, 0)`      | `(q, 0)`  | `(q, 0)`      |
/// | apoapsis        | `(-a(1+e), 0)`| –         | –             |
/// | center          | `(-ae, 0)`    | –         | `(ae, 0)`     |
/// | empty focus     | `(-2ae, 0)`   | –         | `(2ae, 0)`    |
/// | semi-minor axis | `a√(1-e²)`    | –         | `a√(e²-1)`    |
/// | asymptote angle | –             | `π`       | `acos(-1/e)`  |
#[derive(Debug, Clone, PartialEq)]
pub struct ConicGeometry {
    pub periapsis: Vector2<f64>,
    pub apoapsis: Option<Vector2<f64>>,
    pub center: Option<Vector2<f64>>,
    pub empty_focus: Option<Vector2<f64>>,
    pub semi_minor_axis: Option<f64>,
    pub semi_latus_rectum: f64,
    /// Limit of the true anomaly on an open orbit.
    pub asymptote_angle: Option<f64>,
}

impl From<&OrbitShape> for ConicGeometry {
    fn from(shape: &OrbitShape) -> Self {
        let a = shape.size_param();
        let e = shape.eccentricity();
        let periapsis = Vector2::new(shape.periapsis_distance(), 0.0);
        let semi_latus_rectum = shape.semi_latus_rectum();

        match shape.regime() {
            Regime::Elliptic => ConicGeometry {
                periapsis,
                apoapsis: shape.apoapsis_distance().map(|big_q| Vector2::new(-big_q, 0.0)),
                center: Some(Vector2::new(-a * e, 0.0)),
                empty_focus: Some(Vector2::new(-2.0 * a * e, 0.0)),
                semi_minor_axis: Some(a * (1.0 - e * e).sqrt()),
                semi_latus_rectum,
                asymptote_angle: None,
            },
            Regime::Parabolic => ConicGeometry {
                periapsis,
                apoapsis: None,
                center: None,
                empty_focus: None,
                semi_minor_axis: None,
                semi_latus_rectum,
                asymptote_angle: Some(std::f64::consts::PI),
            },
            Regime::Hyperbolic => ConicGeometry {
                periapsis,
                apoapsis: None,
                center: Some(Vector2::new(a * e, 0.0)),
                empty_focus: Some(Vector2::new(2.0 * a * e, 0.0)),
                semi_minor_axis: Some(a * (e * e - 1.0).sqrt()),
                semi_latus_rectum,
                asymptote_angle: Some((-1.0 / e).acos()),
            },
        }
    }
}

impl OrbitShape {
    /// Landmarks of this conic, see [`ConicGeometry`].
    pub fn geometry(&self) -> ConicGeometry {
        ConicGeometry::from(self)
    }
}

#[cfg(test)]
mod conic_geometry_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ellipse_landmarks() {
        let g = OrbitShape::new(5.0, 0.5, 10.0).unwrap().geometry();
        assert_eq!(g.periapsis, Vector2::new(2.5, 0.0));
        assert_eq!(g.apoapsis, Some(Vector2::new(-7.5, 0.0)));
        assert_eq!(g.center, Some(Vector2::new(-2.5, 0.0)));
        assert_eq!(g.empty_focus, Some(Vector2::new(-5.0, 0.0)));
        assert_relative_eq!(g.semi_minor_axis.unwrap(), 5.0 * 0.75_f64.sqrt());
        assert!(g.asymptote_angle.is_none());

        // The center sits halfway between the apsides.
        let mid = (g.periapsis + g.apoapsis.unwrap()) / 2.0;
        assert_relative_eq!(mid.x, g.center.unwrap().x);
    }

    #[test]
    fn test_hyperbola_landmarks() {
        let g = OrbitShape::new(5.0, 1.3, 10.0).unwrap().geometry();
        assert_relative_eq!(g.periapsis.x, 1.5, epsilon = 1e-12);
        assert!(g.apoapsis.is_none());
        // The vertex lies between the focus and the center, `a` away from the center.
        assert_relative_eq!(g.center.unwrap().x - g.periapsis.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(g.empty_focus.unwrap().x, 13.0, epsilon = 1e-12);
        assert_relative_eq!(g.asymptote_angle.unwrap(), (-1.0 / 1.3_f64).acos());
    }

    #[test]
    fn test_parabola_landmarks() {
        let g = OrbitShape::new(2.0, 1.0, 1.0).unwrap().geometry();
        assert_eq!(g.periapsis, Vector2::new(2.0, 0.0));
        assert!(g.center.is_none());
        assert!(g.empty_focus.is_none());
        assert_relative_eq!(g.semi_latus_rectum, 4.0);
    }
}
