//! # Orbit shapes and regimes
//!
//! This module defines the immutable [`OrbitShape`] value consumed by every
//! other component, and the [`Regime`] tag derived from it:
//!
//! - [`Regime::Elliptic`]: bound motion, `e < 1` outside the parabolic band.
//! - [`Regime::Parabolic`]: marginally bound motion, `|e - 1| < 0.005`.
//! - [`Regime::Hyperbolic`]: unbound motion, `e > 1` outside the parabolic band.
//!
//! ## Size parameter
//!
//! A shape carries a single length, the **size parameter**. Outside the
//! parabolic band it is the semi-major axis `a` (the real semi-axis for a
//! hyperbola, taken positive). Inside the band it is read as the **periapsis
//! distance** `q`, because `a` diverges for a true parabola. This is a
//! regime-selection rule of the visualizer: an eccentricity of `0.996` and one
//! of `0.994` with the same size parameter describe very different orbits.
//!
//! ## Typical workflow
//!
//! ```rust
//! use orbitview::orbit_type::{OrbitShape, Regime};
//!
//! let shape = OrbitShape::new(5.0, 0.5, 10.0).unwrap();
//! assert_eq!(shape.regime(), Regime::Elliptic);
//! assert!((shape.periapsis_distance() - 2.5).abs() < 1e-12);
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{constants::PARABOLIC_BAND, orbit_errors::OrbitError};

/// Geometric helpers for the conic (apsides, center, foci).
pub mod conic_geometry;

/// Conic regime of an orbit shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    Elliptic,
    Parabolic,
    Hyperbolic,
}

impl Regime {
    /// Classify an eccentricity.
    ///
    /// The band `|e - 1| < PARABOLIC_BAND` is parabolic; an eccentricity
    /// exactly on the band edge falls on the elliptic or hyperbolic side.
    pub fn from_eccentricity(e: f64) -> Self {
        if (e - 1.0).abs() < PARABOLIC_BAND {
            Regime::Parabolic
        } else if e < 1.0 {
            Regime::Elliptic
        } else {
            Regime::Hyperbolic
        }
    }

    /// Whether the motion is bound (closed orbit).
    pub fn is_bound(&self) -> bool {
        matches!(self, Regime::Elliptic)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Elliptic => write!(f, "elliptic"),
            Regime::Parabolic => write!(f, "parabolic"),
            Regime::Hyperbolic => write!(f, "hyperbolic"),
        }
    }
}

/// Raw, unvalidated shape parameters.
///
/// This is the serialized form of an [`OrbitShape`]; conversion through
/// [`TryFrom`] applies the constructor's validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitShapeParams {
    pub size_param: f64,
    pub eccentricity: f64,
    pub mu: f64,
}

/// Immutable shape of a two-body orbit.
///
/// Units & conventions
/// --------------------
/// - Periapsis lies on the `+x` axis, the attracting body at the origin (focus).
/// - Motion is counter-clockwise; time is counted from periapsis passage.
/// - `mu` sets the time scale (`n = sqrt(mu / size³)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrbitShapeParams", into = "OrbitShapeParams")]
pub struct OrbitShape {
    size_param: f64,
    eccentricity: f64,
    mu: f64,
    regime: Regime,
}

impl OrbitShape {
    /// Build and validate an orbit shape.
    ///
    /// Arguments
    /// -----------------
    /// * `size_param` – Semi-major axis, or periapsis distance inside the parabolic band (> 0).
    /// * `eccentricity` – Eccentricity (>= 0).
    /// * `mu` – Standard gravitational parameter (> 0).
    ///
    /// Errors
    /// ----------
    /// * [`OrbitError::InvalidSizeParameter`] if `size_param` is not finite or `<= 0`.
    /// * [`OrbitError::InvalidEccentricity`] if `eccentricity` is not finite or `< 0`.
    /// * [`OrbitError::InvalidGravitationalParameter`] if `mu` is not finite or `<= 0`.
    pub fn new(size_param: f64, eccentricity: f64, mu: f64) -> Result<Self, OrbitError> {
        if !(size_param.is_finite() && size_param > 0.0) {
            return Err(OrbitError::InvalidSizeParameter(size_param));
        }
        if !(eccentricity.is_finite() && eccentricity >= 0.0) {
            return Err(OrbitError::InvalidEccentricity(eccentricity));
        }
        if !(mu.is_finite() && mu > 0.0) {
            return Err(OrbitError::InvalidGravitationalParameter(mu));
        }

        Ok(OrbitShape {
            size_param,
            eccentricity,
            mu,
            regime: Regime::from_eccentricity(eccentricity),
        })
    }

    /// Build an elliptic or hyperbolic shape from its periapsis distance.
    ///
    /// Inside the parabolic band the periapsis distance is the size parameter
    /// itself; elsewhere `a = q / |1 - e|`.
    pub fn from_periapsis(
        periapsis_distance: f64,
        eccentricity: f64,
        mu: f64,
    ) -> Result<Self, OrbitError> {
        let size_param = match Regime::from_eccentricity(eccentricity) {
            Regime::Parabolic => periapsis_distance,
            Regime::Elliptic | Regime::Hyperbolic => {
                periapsis_distance / (1.0 - eccentricity).abs()
            }
        };
        if !(periapsis_distance.is_finite() && periapsis_distance > 0.0) {
            return Err(OrbitError::InvalidSizeParameter(periapsis_distance));
        }
        OrbitShape::new(size_param, eccentricity, mu)
    }

    pub fn size_param(&self) -> f64 {
        self.size_param
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Semi-major axis (positive real semi-axis for a hyperbola), `None` inside the parabolic band.
    pub fn semi_major_axis(&self) -> Option<f64> {
        match self.regime {
            Regime::Parabolic => None,
            Regime::Elliptic | Regime::Hyperbolic => Some(self.size_param),
        }
    }

    /// Periapsis distance `q`.
    ///
    /// * Elliptic: `a(1 - e)`
    /// * Parabolic: the size parameter
    /// * Hyperbolic: `a(e - 1)`
    pub fn periapsis_distance(&self) -> f64 {
        match self.regime {
            Regime::Elliptic => self.size_param * (1.0 - self.eccentricity),
            Regime::Parabolic => self.size_param,
            Regime::Hyperbolic => self.size_param * (self.eccentricity - 1.0),
        }
    }

    /// Apoapsis distance `a(1 + e)`, elliptic orbits only.
    pub fn apoapsis_distance(&self) -> Option<f64> {
        match self.regime {
            Regime::Elliptic => Some(self.size_param * (1.0 + self.eccentricity)),
            Regime::Parabolic | Regime::Hyperbolic => None,
        }
    }

    /// Mean motion `n = sqrt(mu / size³)`.
    ///
    /// For a parabolic shape the size parameter is the periapsis distance, so
    /// this is `sqrt(mu / q³)`. It is the rate used to turn a phase offset into a
    /// time offset for every regime.
    pub fn mean_motion(&self) -> f64 {
        (self.mu / self.size_param.powi(3)).sqrt()
    }

    /// Orbital period `2π·sqrt(a³/mu)`, elliptic orbits only.
    pub fn period(&self) -> Option<f64> {
        match self.regime {
            Regime::Elliptic => Some(std::f64::consts::TAU / self.mean_motion()),
            Regime::Parabolic | Regime::Hyperbolic => None,
        }
    }

    /// Semi-latus rectum `p`.
    ///
    /// * Elliptic: `a(1 - e²)`
    /// * Parabolic: `2q`
    /// * Hyperbolic: `a(e² - 1)`
    pub fn semi_latus_rectum(&self) -> f64 {
        let e2 = self.eccentricity * self.eccentricity;
        match self.regime {
            Regime::Elliptic => self.size_param * (1.0 - e2),
            Regime::Parabolic => 2.0 * self.size_param,
            Regime::Hyperbolic => self.size_param * (e2 - 1.0),
        }
    }

    /// Specific angular momentum `h = sqrt(mu·p)`.
    pub fn specific_angular_momentum(&self) -> f64 {
        (self.mu * self.semi_latus_rectum()).sqrt()
    }

    /// Specific orbital energy: `-mu/2a` (elliptic), `0` (parabolic), `+mu/2a` (hyperbolic).
    pub fn specific_energy(&self) -> f64 {
        match self.regime {
            Regime::Elliptic => -self.mu / (2.0 * self.size_param),
            Regime::Parabolic => 0.0,
            Regime::Hyperbolic => self.mu / (2.0 * self.size_param),
        }
    }

    /// Vis-viva speed at radius `r`: `sqrt(mu·(2/r + 2ε/mu))` with `ε` the specific energy.
    pub fn vis_viva_speed(&self, r: f64) -> f64 {
        (2.0 * (self.mu / r + self.specific_energy())).sqrt()
    }
}

impl TryFrom<OrbitShapeParams> for OrbitShape {
    type Error = OrbitError;

    fn try_from(p: OrbitShapeParams) -> Result<Self, Self::Error> {
        OrbitShape::new(p.size_param, p.eccentricity, p.mu)
    }
}

impl From<OrbitShape> for OrbitShapeParams {
    fn from(shape: OrbitShape) -> Self {
        OrbitShapeParams {
            size_param: shape.size_param,
            eccentricity: shape.eccentricity,
            mu: shape.mu,
        }
    }
}

impl fmt::Display for OrbitShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{} orbit]", self.regime)?;
        match self.regime {
            Regime::Parabolic => writeln!(f, "  q  = {:.6}", self.size_param)?,
            Regime::Elliptic | Regime::Hyperbolic => writeln!(f, "  a  = {:.6}", self.size_param)?,
        }
        writeln!(f, "  e  = {:.6}", self.eccentricity)?;
        write!(f, "  mu = {:.6}", self.mu)
    }
}
