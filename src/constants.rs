//! # Constants and type definitions for orbitview
//!
//! This module centralizes the **numerical constants** and **common type
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Angular constants
//! - Regime-selection tolerance around `e = 1`
//! - Anomaly solver defaults (iteration cap, tolerances)
//! - Display sampling bounds (hyperbolic asymptote fraction, parabolic anomaly range)
//! - Trajectory interpolation defaults
//!
//! All quantities are expressed in the caller's normalized units: distances in
//! the same unit as the shape's size parameter, times in the unit implied by `mu`.

// -------------------------------------------------------------------------------------------------
// Angular constants
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

// -------------------------------------------------------------------------------------------------
// Regime selection
// -------------------------------------------------------------------------------------------------

/// Half-width of the eccentricity band around `e = 1` treated as parabolic.
///
/// Inside the band (`|e - 1| < PARABOLIC_BAND`) the shape size parameter is read
/// as the periapsis distance instead of the semi-major axis.
pub const PARABOLIC_BAND: f64 = 0.005;

// -------------------------------------------------------------------------------------------------
// Anomaly solver defaults
// -------------------------------------------------------------------------------------------------

/// Fixed Newton–Raphson iteration cap for the elliptic and hyperbolic solvers
pub const KEPLER_MAX_ITER: usize = 15;

/// Step size under which the Newton–Raphson iteration may stop early
pub const KEPLER_EPS: f64 = 1e-6;

/// Floor on `|e·cosh(H) - 1|` under which the hyperbolic iteration freezes
pub const HYPERBOLIC_DERIVATIVE_FLOOR: f64 = 1e-5;

/// Eccentricity above which the elliptic iteration starts from `E0 = ±π` instead of `E0 = M`
pub const ELLIPTIC_PI_START_ECCENTRICITY: f64 = 0.8;

// -------------------------------------------------------------------------------------------------
// Curve sampling
// -------------------------------------------------------------------------------------------------

/// Fraction of the asymptotic true anomaly `acos(-1/e)` swept when drawing a hyperbola
pub const HYPERBOLIC_ASYMPTOTE_FRACTION: f64 = 0.92;

/// Bound on the parabolic anomaly `D = tan(ν/2)` swept when drawing a parabola
pub const PARABOLIC_ANOMALY_BOUND: f64 = 6.0;

/// Default segment count used to draw an orbit
pub const DEFAULT_ORBIT_SEGMENTS: usize = 250;

/// Number of equal time sub-steps used to draw the arc of one swept-area sector
pub const SECTOR_ARC_SAMPLES: usize = 10;

// -------------------------------------------------------------------------------------------------
// Trajectory interpolation
// -------------------------------------------------------------------------------------------------

/// Curve-parameter offset of the look-ahead point used to orient a probe
pub const LOOK_AHEAD_PARAMETER: f64 = 0.01;

/// Speed of the straight-line extrapolation beyond the last encounter
pub const EXIT_SPEED: f64 = 2.5;

/// Tension of the uniform Catmull-Rom curve through the encounter anchors
pub const CATMULL_ROM_TENSION: f64 = 0.5;

/// Half-width (in mission time) of the window classified as a flyby around an encounter
pub const FLYBY_HALF_WINDOW: f64 = 0.3;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;

/// Time elapsed since periapsis passage, in the unit implied by `mu`
pub type TimeSincePeriapsis = f64;

/// Mission elapsed time, counted from trajectory arm-time
pub type MissionTime = f64;
