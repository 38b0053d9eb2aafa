//! # Anomaly solver
//!
//! Converts a time-proportional "mean anomaly like" quantity into the anomaly
//! native to each conic regime:
//!
//! | Regime     | Time law                     | Method                          |
//! |------------|------------------------------|---------------------------------|
//! | Elliptic   | `M = E - e·sin(E)`           | Newton–Raphson, capped          |
//! | Hyperbolic | `M = e·sinh(H) - H`          | Newton–Raphson, capped, guarded |
//! | Parabolic  | `D³ + 3D - 6·Mp = 0` (Barker) | Closed-form real cubic root     |
//!
//! ## Failure policy
//!
//! The solver never fails. When the iteration cap is reached before the step
//! drops under the tolerance, the last iterate is returned. For well-posed
//! inputs the residual error is far below display resolution; this is an
//! accepted approximation of a real-time visualizer, not an exact answer.
//!
//! ## Configuration
//!
//! The iteration cap and tolerances are gathered in [`SolverParams`], built
//! through [`SolverParamsBuilder`]. The defaults reproduce the fixed behavior
//! (15 iterations, `1e-6` step tolerance, `1e-5` derivative floor).
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DPI, ELLIPTIC_PI_START_ECCENTRICITY, HYPERBOLIC_DERIVATIVE_FLOOR, KEPLER_EPS,
        KEPLER_MAX_ITER,
    },
    orbit_errors::OrbitError,
    orbit_type::Regime,
};

/// Wrap an angle into `[-π, π)`.
pub(crate) fn wrap_angle(a: f64) -> f64 {
    (a + PI).rem_euclid(DPI) - PI
}

/// Tuning knobs of the Newton–Raphson solvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverParams {
    /// Hard cap on Newton–Raphson iterations (elliptic and hyperbolic).
    pub max_iter: usize,
    /// The iteration stops once `|Δ| < eps`.
    pub eps: f64,
    /// The hyperbolic iteration freezes when `|e·cosh(H) - 1|` falls under this value.
    pub hyperbolic_derivative_floor: f64,
}

impl SolverParams {
    pub fn builder() -> SolverParamsBuilder {
        SolverParamsBuilder::new()
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            max_iter: KEPLER_MAX_ITER,
            eps: KEPLER_EPS,
            hyperbolic_derivative_floor: HYPERBOLIC_DERIVATIVE_FLOOR,
        }
    }
}

/// Consuming builder for [`SolverParams`].
#[derive(Debug, Clone)]
pub struct SolverParamsBuilder {
    params: SolverParams,
}

impl Default for SolverParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: SolverParams::default(),
        }
    }

    pub fn max_iter(mut self, v: usize) -> Self {
        self.params.max_iter = v;
        self
    }
    pub fn eps(mut self, v: f64) -> Self {
        self.params.eps = v;
        self
    }
    pub fn hyperbolic_derivative_floor(mut self, v: f64) -> Self {
        self.params.hyperbolic_derivative_floor = v;
        self
    }

    /// Finalize the builder and produce a [`SolverParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `max_iter >= 1`
    /// * `eps > 0.0` and finite
    /// * `hyperbolic_derivative_floor > 0.0` and finite
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SolverParams)` if all values are valid.
    /// * `Err(OrbitError::InvalidSolverParameter)` otherwise.
    pub fn build(self) -> Result<SolverParams, OrbitError> {
        let p = &self.params;

        if p.max_iter == 0 {
            return Err(OrbitError::InvalidSolverParameter(
                "max_iter must be >= 1".into(),
            ));
        }
        if !(p.eps.is_finite() && p.eps > 0.0) {
            return Err(OrbitError::InvalidSolverParameter(
                "eps must be finite and > 0".into(),
            ));
        }
        if !(p.hyperbolic_derivative_floor.is_finite() && p.hyperbolic_derivative_floor > 0.0) {
            return Err(OrbitError::InvalidSolverParameter(
                "hyperbolic_derivative_floor must be finite and > 0".into(),
            ));
        }

        Ok(self.params)
    }
}

/// Regime-dispatching anomaly solver.
///
/// The solver is a small `Copy` value holding its [`SolverParams`]; it carries
/// no state between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnomalySolver {
    params: SolverParams,
}

impl AnomalySolver {
    pub fn new(params: SolverParams) -> Self {
        AnomalySolver { params }
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Solve the time law of `regime` for its native anomaly.
    ///
    /// Arguments
    /// -----------------
    /// * `regime` – Conic regime selecting the time law.
    /// * `mean_anomaly` – `M = n·t` for elliptic/hyperbolic motion, `Mp` for parabolic motion.
    /// * `e` – Eccentricity (ignored for the parabolic closed form).
    ///
    /// Return
    /// ----------
    /// * Eccentric anomaly `E`, hyperbolic anomaly `H` or parabolic anomaly `D = tan(ν/2)`.
    pub fn solve(&self, regime: Regime, mean_anomaly: f64, e: f64) -> f64 {
        match regime {
            Regime::Elliptic => self.eccentric_anomaly(mean_anomaly, e),
            Regime::Hyperbolic => self.hyperbolic_anomaly(mean_anomaly, e),
            Regime::Parabolic => parabolic_anomaly(mean_anomaly),
        }
    }

    /// Solve Kepler's equation `M = E - e·sin(E)` for `0 <= e < 1`.
    ///
    /// The mean anomaly is first wrapped into `[-π, π)`, which shifts the
    /// result by a whole number of turns and leaves the state unchanged.
    ///
    /// The iteration starts from `E0 = M` for moderate eccentricities. Above
    /// [`ELLIPTIC_PI_START_ECCENTRICITY`] it starts from `E0 = π·sign(M)`:
    /// `f(E) = E - e·sin(E) - M` is convex on `[0, π]` with `f(π) >= 0`
    /// (mirrored for `M < 0`), so Newton decreases monotonically onto the root
    /// and stays within the iteration cap up to `e = 0.995`. `1 - e·cos(E)`
    /// stays `>= 1 - e > 0`.
    pub fn eccentric_anomaly(&self, mean_anomaly: f64, e: f64) -> f64 {
        let m = wrap_angle(mean_anomaly);
        let mut ecc_anom = if e > ELLIPTIC_PI_START_ECCENTRICITY {
            PI.copysign(m)
        } else {
            m
        };

        for _ in 0..self.params.max_iter {
            let delta = (ecc_anom - e * ecc_anom.sin() - m) / (1.0 - e * ecc_anom.cos());
            ecc_anom -= delta;
            if delta.abs() < self.params.eps {
                return ecc_anom;
            }
        }

        log::trace!(
            "elliptic Kepler solver reached {} iterations (M = {mean_anomaly}, e = {e})",
            self.params.max_iter
        );
        ecc_anom
    }

    /// Solve the hyperbolic Kepler equation `M = e·sinh(H) - H` for `e > 1`.
    ///
    /// The nominal starting point `M/(e-1)` is an upper bound of `|H|`, and so
    /// is `asinh(M/(e-1))`; the tighter of the two is used, which keeps the
    /// Newton sequence monotone and lets long elapsed times converge within the
    /// iteration cap. The iteration freezes on the current estimate when the
    /// derivative `e·cosh(H) - 1` becomes too small to divide by.
    pub fn hyperbolic_anomaly(&self, mean_anomaly: f64, e: f64) -> f64 {
        let guess = mean_anomaly / (e - 1.0);
        let mut hyp_anom = if guess.abs() > 1.0 {
            guess.asinh()
        } else {
            guess
        };

        for _ in 0..self.params.max_iter {
            let df = e * hyp_anom.cosh() - 1.0;
            if df.abs() < self.params.hyperbolic_derivative_floor {
                log::trace!("hyperbolic Kepler solver froze on a vanishing derivative (H = {hyp_anom})");
                return hyp_anom;
            }
            let delta = (e * hyp_anom.sinh() - hyp_anom - mean_anomaly) / df;
            hyp_anom -= delta;
            if delta.abs() < self.params.eps {
                return hyp_anom;
            }
        }

        log::trace!(
            "hyperbolic Kepler solver reached {} iterations (M = {mean_anomaly}, e = {e})",
            self.params.max_iter
        );
        hyp_anom
    }
}

/// Closed-form solution of Barker's equation.
///
/// Returns the real root `D` of `D³ + 3D - 2W = 0` with `W = 3·Mp`, through
/// `Y = cbrt(W + sqrt(W² + 1))` and `D = Y - 1/Y`. The root is odd in `W`; it
/// is evaluated on `|W|` to avoid the cancellation of `W + sqrt(W² + 1)` for
/// large negative `W`.
pub fn parabolic_anomaly(parabolic_mean_anomaly: f64) -> f64 {
    let w = 3.0 * parabolic_mean_anomaly;
    let w_abs = w.abs();
    let y = (w_abs + (w_abs * w_abs + 1.0).sqrt()).cbrt();
    (y - 1.0 / y).copysign(w)
}
