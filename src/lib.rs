//! # orbitview
//!
//! Planar two-body orbit mechanics for interactive visualizers.
//!
//! Given an [`OrbitShape`](crate::orbit_type::OrbitShape) (size parameter,
//! eccentricity, gravitational parameter), the crate computes:
//!
//! * the state of a body at any time since periapsis, for elliptic, parabolic
//!   and hyperbolic orbits ([`propagator`]),
//! * point sequences drawing the orbit ([`orbit_curve`]),
//! * the equal-time sectors of Kepler's second law ([`swept_area`]),
//! * a smooth, time-mapped probe path through scripted encounters ([`trajectories`]).
//!
//! Every computation is a pure function of its inputs. Time is always supplied
//! by the caller; per-frame accumulators live in [`time`] and in
//! [`trajectories::path_mapper`].
//!
//! ```rust
//! use orbitview::{orbit_curve::sample_curve, propagator::state, orbit_type::OrbitShape};
//!
//! let comet = OrbitShape::new(2.0, 1.0, 10.0).unwrap();
//! let outline = sample_curve(&comet, 250);
//! assert!(!outline.closed);
//!
//! let s = state(&comet, 0.0);
//! assert!((s.r - 2.0).abs() < 1e-12);
//! ```
pub mod constants;
pub mod kepler;
pub mod orbit_curve;
pub mod orbit_errors;
pub mod orbit_type;
pub mod propagator;
pub mod swept_area;
pub mod time;
pub mod trajectories;

pub use orbit_errors::OrbitError;
pub use orbit_type::{OrbitShape, Regime};
pub use propagator::{OrbitPropagator, State};
