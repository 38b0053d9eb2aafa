//! # Trajectories: scripted probe paths
//!
//! A probe follows a smooth path through a list of scripted encounters,
//! reaching each one exactly on time.
//!
//! Modules
//! -----------------
//! * [`encounter`](crate::trajectories::encounter) – Encounter targets, the validated
//!   [`EncounterSchedule`](crate::trajectories::encounter::EncounterSchedule) and mission phases.
//! * [`catmull_rom`](crate::trajectories::catmull_rom) – Catmull-Rom interpolation through the anchors.
//! * [`path_mapper`](crate::trajectories::path_mapper) – Time → pose map and the per-frame mapper.
//!
//! Configuration
//! -----------------
//! [`TrajectoryParams`] gathers the tunables of the path (look-ahead, exit
//! speed, curve kind, flyby window). Build it through
//! [`TrajectoryParams::builder`]; the defaults are the usual visualizer values.
//!
//! ```rust
//! use orbitview::trajectories::{catmull_rom::CurveKind, TrajectoryParams};
//!
//! let params = TrajectoryParams::builder()
//!     .exit_speed(4.0)
//!     .curve_kind(CurveKind::Centripetal)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.exit_speed, 4.0);
//! ```
use serde::{Deserialize, Serialize};

use crate::{
    constants::{EXIT_SPEED, FLYBY_HALF_WINDOW, LOOK_AHEAD_PARAMETER},
    orbit_errors::OrbitError,
};

use self::catmull_rom::CurveKind;

pub mod catmull_rom;
pub mod encounter;
pub mod path_mapper;

/// Tunables of a probe path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryParams {
    /// Curve parameter offset of the point the probe faces.
    pub look_ahead: f64,
    /// Distance per unit of mission time after the last encounter.
    pub exit_speed: f64,
    pub curve_kind: CurveKind,
    /// Half-width, in mission time, of a flyby window.
    pub flyby_half_window: f64,
}

impl TrajectoryParams {
    pub fn builder() -> TrajectoryParamsBuilder {
        TrajectoryParamsBuilder::new()
    }
}

impl Default for TrajectoryParams {
    fn default() -> Self {
        TrajectoryParams {
            look_ahead: LOOK_AHEAD_PARAMETER,
            exit_speed: EXIT_SPEED,
            curve_kind: CurveKind::default(),
            flyby_half_window: FLYBY_HALF_WINDOW,
        }
    }
}

/// Consuming builder for [`TrajectoryParams`].
#[derive(Debug, Clone, Default)]
pub struct TrajectoryParamsBuilder {
    params: TrajectoryParams,
}

impl TrajectoryParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn look_ahead(mut self, v: f64) -> Self {
        self.params.look_ahead = v;
        self
    }
    pub fn exit_speed(mut self, v: f64) -> Self {
        self.params.exit_speed = v;
        self
    }
    pub fn curve_kind(mut self, v: CurveKind) -> Self {
        self.params.curve_kind = v;
        self
    }
    /// Shorthand for a uniform curve with the given tension.
    pub fn tension(mut self, v: f64) -> Self {
        self.params.curve_kind = CurveKind::Uniform { tension: v };
        self
    }
    pub fn flyby_half_window(mut self, v: f64) -> Self {
        self.params.flyby_half_window = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `0 < look_ahead <= 1`
    /// * `exit_speed >= 0` and finite
    /// * uniform `tension` finite and `> 0`
    /// * `flyby_half_window >= 0` and finite
    pub fn build(self) -> Result<TrajectoryParams, OrbitError> {
        let p = &self.params;

        if !(p.look_ahead > 0.0 && p.look_ahead <= 1.0) {
            return Err(OrbitError::InvalidTrajectoryParameter(
                "look_ahead must be in (0, 1]".into(),
            ));
        }
        if !(p.exit_speed.is_finite() && p.exit_speed >= 0.0) {
            return Err(OrbitError::InvalidTrajectoryParameter(
                "exit_speed must be finite and >= 0".into(),
            ));
        }
        if let CurveKind::Uniform { tension } = p.curve_kind {
            if !(tension.is_finite() && tension > 0.0) {
                return Err(OrbitError::InvalidTrajectoryParameter(
                    "tension must be finite and > 0".into(),
                ));
            }
        }
        if !(p.flyby_half_window.is_finite() && p.flyby_half_window >= 0.0) {
            return Err(OrbitError::InvalidTrajectoryParameter(
                "flyby_half_window must be finite and >= 0".into(),
            ));
        }

        Ok(self.params)
    }
}

#[cfg(test)]
mod trajectory_params_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = TrajectoryParams::builder().build().unwrap();
        assert_eq!(params, TrajectoryParams::default());
        assert_eq!(params.look_ahead, 0.01);
        assert_eq!(params.exit_speed, 2.5);
        assert_eq!(params.curve_kind, CurveKind::Uniform { tension: 0.5 });
        assert_eq!(params.flyby_half_window, 0.3);
    }

    #[test]
    fn test_invalid_params() {
        let err = TrajectoryParams::builder().look_ahead(0.0).build();
        assert!(matches!(err, Err(OrbitError::InvalidTrajectoryParameter(_))));
        assert!(TrajectoryParams::builder().look_ahead(f64::NAN).build().is_err());
        assert!(TrajectoryParams::builder().exit_speed(-1.0).build().is_err());
        assert!(TrajectoryParams::builder().tension(0.0).build().is_err());
        assert!(TrajectoryParams::builder()
            .flyby_half_window(f64::INFINITY)
            .build()
            .is_err());
        assert!(TrajectoryParams::builder()
            .curve_kind(CurveKind::Centripetal)
            .build()
            .is_ok());
    }
}
