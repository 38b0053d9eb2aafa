//! Catmull-Rom interpolation through an ordered list of planar points.
//!
//! The curve is parametrised by `u ∈ [0, 1]`, distributed uniformly over the
//! control points in index order: `u = i / (N - 1)` is exactly control point
//! `i`, whatever the spacing between points. Each span is a cubic Hermite
//! segment whose tangents come from the neighbouring points; the two missing
//! neighbours at the ends are mirrored (`2·P₀ - P₁` and `2·Pₙ - Pₙ₋₁`).
//!
//! Two tangent rules are available through [`CurveKind`]:
//!
//! * `Uniform { tension }` – `T₁ = τ·(P₂ - P₀)`, the classic cardinal spline
//!   (`τ = 0.5` is the usual Catmull-Rom curve).
//! * `Centripetal` – non-uniform knots spaced by `|Pᵢ₊₁ - Pᵢ|^½`, which avoids
//!   cusps and self-intersections when control points are unevenly spaced.
use nalgebra::{Unit, Vector2};
use serde::{Deserialize, Serialize};

use crate::{constants::CATMULL_ROM_TENSION, orbit_errors::OrbitError};

/// Knot spacings below this value are treated as coincident points.
const MIN_KNOT_SPACING: f64 = 1e-4;

/// Tangent rule of a [`CatmullRomCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CurveKind {
    Uniform { tension: f64 },
    Centripetal,
}

impl Default for CurveKind {
    fn default() -> Self {
        CurveKind::Uniform {
            tension: CATMULL_ROM_TENSION,
        }
    }
}

/// Polynomial coefficients `c0 + c1·w + c2·w² + c3·w³` of one span.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    c0: Vector2<f64>,
    c1: Vector2<f64>,
    c2: Vector2<f64>,
    c3: Vector2<f64>,
}

impl Span {
    fn hermite(p1: Vector2<f64>, p2: Vector2<f64>, t1: Vector2<f64>, t2: Vector2<f64>) -> Self {
        Span {
            c0: p1,
            c1: t1,
            c2: -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2,
            c3: 2.0 * p1 - 2.0 * p2 + t1 + t2,
        }
    }

    fn point(&self, w: f64) -> Vector2<f64> {
        self.c0 + (self.c1 + (self.c2 + self.c3 * w) * w) * w
    }

    /// Derivative with respect to the local weight `w`.
    fn derivative(&self, w: f64) -> Vector2<f64> {
        self.c1 + (2.0 * self.c2 + 3.0 * self.c3 * w) * w
    }
}

/// Open Catmull-Rom curve through at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<Vector2<f64>>,
    spans: Vec<Span>,
    kind: CurveKind,
}

impl CatmullRomCurve {
    /// Build the curve through `points`, in order.
    ///
    /// Errors
    /// ----------
    /// * [`OrbitError::InvalidTrajectoryParameter`] with fewer than two points or a non-finite point.
    pub fn new(points: Vec<Vector2<f64>>, kind: CurveKind) -> Result<Self, OrbitError> {
        if points.len() < 2 {
            return Err(OrbitError::InvalidTrajectoryParameter(format!(
                "a Catmull-Rom curve needs at least two points, got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(OrbitError::InvalidTrajectoryParameter(
                "Catmull-Rom control points must be finite".into(),
            ));
        }

        let n = points.len();
        let spans = (0..n - 1)
            .map(|i| {
                let p1 = points[i];
                let p2 = points[i + 1];
                let p0 = if i > 0 { points[i - 1] } else { 2.0 * p1 - p2 };
                let p3 = if i + 2 < n {
                    points[i + 2]
                } else {
                    2.0 * p2 - p1
                };
                let (t1, t2) = match kind {
                    CurveKind::Uniform { tension } => (tension * (p2 - p0), tension * (p3 - p1)),
                    CurveKind::Centripetal => centripetal_tangents(p0, p1, p2, p3),
                };
                Span::hermite(p1, p2, t1, t2)
            })
            .collect();

        Ok(CatmullRomCurve {
            points,
            spans,
            kind,
        })
    }

    pub fn control_points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Number of spans (`N - 1`).
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Split a global parameter into a span index and a local weight in `[0, 1]`.
    fn locate(&self, u: f64) -> (usize, f64) {
        let last = self.spans.len() - 1;
        let p = u.clamp(0.0, 1.0) * self.spans.len() as f64;
        let index = p.floor() as usize;
        if index > last {
            (last, 1.0)
        } else {
            (index, p - index as f64)
        }
    }

    /// Point on span `index` at local weight `weight ∈ [0, 1]`.
    ///
    /// `segment_point(i, 0.0)` is exactly control point `i`.
    pub fn segment_point(&self, index: usize, weight: f64) -> Vector2<f64> {
        let index = index.min(self.spans.len() - 1);
        self.spans[index].point(weight.clamp(0.0, 1.0))
    }

    /// Point at global parameter `u`, clamped to `[0, 1]`.
    pub fn point(&self, u: f64) -> Vector2<f64> {
        let (index, weight) = self.locate(u);
        self.spans[index].point(weight)
    }

    /// Derivative `dP/du` at global parameter `u`.
    pub fn derivative(&self, u: f64) -> Vector2<f64> {
        let (index, weight) = self.locate(u);
        self.spans[index].derivative(weight) * self.spans.len() as f64
    }

    /// Unit tangent at `u`, `None` where the curve is stationary.
    pub fn tangent(&self, u: f64) -> Option<Unit<Vector2<f64>>> {
        Unit::try_new(self.derivative(u), f64::EPSILON)
    }

    /// Sample `segments + 1` points uniformly in `u`, for drawing the path.
    pub fn sample(&self, segments: usize) -> Vec<Vector2<f64>> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point(i as f64 / segments as f64))
            .collect()
    }
}

/// Span tangents of a centripetal Catmull-Rom curve, scaled to the `[0, 1]` span weight.
fn centripetal_tangents(
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
) -> (Vector2<f64>, Vector2<f64>) {
    let knot = |a: Vector2<f64>, b: Vector2<f64>| (b - a).norm().sqrt();

    let mut dt1 = knot(p1, p2);
    if dt1 < MIN_KNOT_SPACING {
        dt1 = 1.0;
    }
    let mut dt0 = knot(p0, p1);
    if dt0 < MIN_KNOT_SPACING {
        dt0 = dt1;
    }
    let mut dt2 = knot(p2, p3);
    if dt2 < MIN_KNOT_SPACING {
        dt2 = dt1;
    }

    let t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
    let t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
    (t1 * dt1, t2 * dt1)
}
