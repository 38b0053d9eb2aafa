//! # Two-body state propagation
//!
//! Evaluates the planar position, velocity and radius of a body at a given time
//! since periapsis passage, for every conic regime.
//!
//! The regime is dispatched **once**, when an [`OrbitPropagator`] is built from
//! an [`OrbitShape`]: the per-regime constants (mean motion, axis ratios,
//! angular momentum, …) are precomputed and stored in a tagged variant. Each
//! call to [`OrbitPropagator::state`] then solves the regime time law with the
//! [`AnomalySolver`] and evaluates the closed-form state.
//!
//! ## Time laws
//!
//! * **Elliptic** – `M = n·t`, Kepler's equation for the eccentric anomaly `E`.
//! * **Parabolic** – `Mp = ½·sqrt(mu / 2q³)·t`, Barker's equation for `D = tan(ν/2)`.
//! * **Hyperbolic** – `M = n·t`, hyperbolic Kepler equation for `H`.
//!
//! ## Degradation
//!
//! A branch that evaluates to a non-finite radius returns [`State::ZERO`]
//! instead of propagating `NaN` to the caller.
//!
//! ## Example
//!
//! ```rust
//! use orbitview::orbit_type::OrbitShape;
//! use orbitview::propagator::OrbitPropagator;
//!
//! let shape = OrbitShape::new(5.0, 0.5, 10.0).unwrap();
//! let propagator = OrbitPropagator::new(&shape);
//! let periapsis = propagator.state(0.0);
//! assert!((periapsis.r - 2.5).abs() < 1e-12);
//! ```
use nalgebra::Vector2;

use crate::{
    constants::TimeSincePeriapsis,
    kepler::{parabolic_anomaly, AnomalySolver, SolverParams},
    orbit_type::{OrbitShape, Regime},
};

/// Instantaneous planar state of an orbiting body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Distance to the focus (>= 0).
    pub r: f64,
}

impl State {
    /// Fallback state returned on numerical degeneracy.
    pub const ZERO: State = State {
        x: 0.0,
        y: 0.0,
        vx: 0.0,
        vy: 0.0,
        r: 0.0,
    };

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Vector2<f64> {
        Vector2::new(self.vx, self.vy)
    }

    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Specific mechanical energy `v²/2 - mu/r`.
    pub fn specific_energy(&self, mu: f64) -> f64 {
        0.5 * (self.vx * self.vx + self.vy * self.vy) - mu / self.r
    }

    /// Specific angular momentum `x·vy - y·vx` (positive for prograde motion).
    pub fn angular_momentum(&self) -> f64 {
        self.x * self.vy - self.y * self.vx
    }

    /// True anomaly `atan2(y, x)` in `(-π, π]`.
    pub fn true_anomaly(&self) -> f64 {
        self.y.atan2(self.x)
    }

    fn is_degenerate(&self) -> bool {
        !self.r.is_finite()
    }
}

/// Per-regime constants, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Branch {
    Elliptic {
        a: f64,
        e: f64,
        mean_motion: f64,
        /// `sqrt(mu·a)`
        sqrt_mu_a: f64,
        /// `sqrt(1 - e²)`
        axis_ratio: f64,
    },
    Parabolic {
        q: f64,
        /// `Mp / t = ½·sqrt(mu / 2q³)`
        anomaly_rate: f64,
        /// `mu / h` with `h = sqrt(2·mu·q)`
        mu_over_h: f64,
    },
    Hyperbolic {
        a: f64,
        e: f64,
        mean_motion: f64,
        /// `sqrt(e² - 1)`
        axis_ratio: f64,
    },
}

/// Universal two-body propagator bound to one [`OrbitShape`].
///
/// The propagator is an immutable `Copy` value: a new shape needs a new
/// propagator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPropagator {
    shape: OrbitShape,
    branch: Branch,
    solver: AnomalySolver,
}

impl OrbitPropagator {
    /// Build a propagator with the default solver parameters.
    pub fn new(shape: &OrbitShape) -> Self {
        Self::with_solver_params(shape, SolverParams::default())
    }

    /// Build a propagator with custom solver parameters.
    pub fn with_solver_params(shape: &OrbitShape, params: SolverParams) -> Self {
        let size = shape.size_param();
        let e = shape.eccentricity();
        let mu = shape.mu();

        let branch = match shape.regime() {
            Regime::Elliptic => Branch::Elliptic {
                a: size,
                e,
                mean_motion: shape.mean_motion(),
                sqrt_mu_a: (mu * size).sqrt(),
                axis_ratio: (1.0 - e * e).sqrt(),
            },
            Regime::Parabolic => {
                let q = size;
                Branch::Parabolic {
                    q,
                    anomaly_rate: 0.5 * (mu / (2.0 * q.powi(3))).sqrt(),
                    mu_over_h: mu / (2.0 * mu * q).sqrt(),
                }
            }
            Regime::Hyperbolic => Branch::Hyperbolic {
                a: size,
                e,
                mean_motion: shape.mean_motion(),
                axis_ratio: (e * e - 1.0).sqrt(),
            },
        };

        OrbitPropagator {
            shape: *shape,
            branch,
            solver: AnomalySolver::new(params),
        }
    }

    pub fn shape(&self) -> &OrbitShape {
        &self.shape
    }

    /// Evaluate the state at time `t` since periapsis passage.
    ///
    /// Arguments
    /// -----------------
    /// * `t` – Time since periapsis; negative values lie before periapsis.
    ///
    /// Return
    /// ----------
    /// * The [`State`] at `t`, or [`State::ZERO`] if the evaluation degenerates.
    pub fn state(&self, t: TimeSincePeriapsis) -> State {
        let state = match self.branch {
            Branch::Elliptic {
                a,
                e,
                mean_motion,
                sqrt_mu_a,
                axis_ratio,
            } => {
                let ecc_anom = self.solver.eccentric_anomaly(mean_motion * t, e);
                let (sin_e, cos_e) = ecc_anom.sin_cos();
                let denom = 1.0 - e * cos_e;
                let r = a * denom;

                let cos_nu = (cos_e - e) / denom;
                let sin_nu = axis_ratio * sin_e / denom;

                State {
                    x: r * cos_nu,
                    y: r * sin_nu,
                    vx: -sqrt_mu_a / r * sin_e,
                    vy: sqrt_mu_a * axis_ratio / r * cos_e,
                    r,
                }
            }
            Branch::Parabolic {
                q,
                anomaly_rate,
                mu_over_h,
            } => {
                let d = parabolic_anomaly(anomaly_rate * t);
                let r = q * (1.0 + d * d);
                let nu = 2.0 * d.atan();
                let (sin_nu, cos_nu) = nu.sin_cos();

                let v_radial = mu_over_h * sin_nu;
                let v_transverse = mu_over_h * (1.0 + cos_nu);

                State {
                    x: r * cos_nu,
                    y: r * sin_nu,
                    vx: v_radial * cos_nu - v_transverse * sin_nu,
                    vy: v_radial * sin_nu + v_transverse * cos_nu,
                    r,
                }
            }
            Branch::Hyperbolic {
                a,
                e,
                mean_motion,
                axis_ratio,
            } => {
                let hyp_anom = self.solver.hyperbolic_anomaly(mean_motion * t, e);
                let (sinh_h, cosh_h) = (hyp_anom.sinh(), hyp_anom.cosh());
                let denom = e * cosh_h - 1.0;
                let h_dot = mean_motion / denom;

                State {
                    x: a * (e - cosh_h),
                    y: a * axis_ratio * sinh_h,
                    vx: -a * sinh_h * h_dot,
                    vy: a * axis_ratio * cosh_h * h_dot,
                    r: a * denom,
                }
            }
        };

        if state.is_degenerate() {
            log::trace!("degenerate {} state at t = {t}, returning zero state", self.shape.regime());
            return State::ZERO;
        }
        state
    }
}

/// Evaluate the state of `shape` at time `t` since periapsis.
///
/// Convenience wrapper building a one-shot [`OrbitPropagator`]; callers
/// querying the same shape every frame should keep a propagator instead.
pub fn state(shape: &OrbitShape, t: TimeSincePeriapsis) -> State {
    OrbitPropagator::new(shape).state(t)
}
