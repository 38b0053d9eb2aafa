//! # Probe path mapping
//!
//! Maps mission time onto a smooth path through the anchors of an
//! [`EncounterSchedule`]. The probe reaches anchor `i` exactly at `τᵢ`; between
//! two encounters the curve parameter grows linearly with time, so the probe
//! speeds up on long legs and slows down on short ones. Past the last
//! encounter it leaves along the terminal tangent at a constant speed.
//!
//! [`TrajectoryPath`] is the pure time → pose map. [`TrajectoryPathMapper`]
//! wraps it with the per-frame lifecycle of a host animation loop: arm,
//! advance, pause, disarm.
use nalgebra::{Unit, Vector2};

use crate::{
    constants::MissionTime,
    orbit_errors::OrbitError,
    trajectories::{
        catmull_rom::CatmullRomCurve,
        encounter::{EncounterSchedule, MissionPhase},
        TrajectoryParams,
    },
};

/// Position and heading of the probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector2<f64>,
    /// Unit vector toward the point the probe is heading to.
    pub facing: Unit<Vector2<f64>>,
}

/// Mission time accumulator of one mapper.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MappingAccumulator {
    elapsed_time: MissionTime,
}

impl MappingAccumulator {
    pub fn elapsed_time(&self) -> MissionTime {
        self.elapsed_time
    }

    /// Add `frame_delta × speed`.
    ///
    /// Mission time only moves forward: negative and non-finite steps are dropped.
    pub fn advance(&mut self, frame_delta: f64, speed: f64) -> MissionTime {
        let step = frame_delta * speed;
        if step.is_finite() && step > 0.0 {
            self.elapsed_time += step;
        }
        self.elapsed_time
    }

    pub fn reset(&mut self) {
        self.elapsed_time = 0.0;
    }
}

/// Smooth path through the anchors of a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryPath {
    schedule: EncounterSchedule,
    curve: CatmullRomCurve,
    exit_direction: Unit<Vector2<f64>>,
    params: TrajectoryParams,
}

impl TrajectoryPath {
    /// Compute the anchors of `schedule` and build the curve through them.
    ///
    /// Errors
    /// ----------
    /// * [`OrbitError::InvalidTrajectoryParameter`] if an anchor is not finite,
    ///   or if all anchors coincide so that no exit direction exists.
    pub fn new(schedule: &EncounterSchedule, params: TrajectoryParams) -> Result<Self, OrbitError> {
        let anchors = schedule.anchors();
        let chord = anchors[anchors.len() - 1] - anchors[anchors.len() - 2];
        let curve = CatmullRomCurve::new(anchors, params.curve_kind)?;

        let exit_direction = curve
            .tangent(1.0)
            .or_else(|| Unit::try_new(chord, f64::EPSILON))
            .ok_or_else(|| {
                OrbitError::InvalidTrajectoryParameter(
                    "the last two anchors coincide, the exit direction is undefined".into(),
                )
            })?;

        Ok(TrajectoryPath {
            schedule: schedule.clone(),
            curve,
            exit_direction,
            params,
        })
    }

    pub fn schedule(&self) -> &EncounterSchedule {
        &self.schedule
    }

    pub fn curve(&self) -> &CatmullRomCurve {
        &self.curve
    }

    pub fn params(&self) -> &TrajectoryParams {
        &self.params
    }

    /// Unit direction of the probe once the schedule is exhausted.
    pub fn exit_direction(&self) -> Unit<Vector2<f64>> {
        self.exit_direction
    }

    /// Curve parameter reached at mission time `t`, clamped to `[0, 1]`.
    pub fn curve_parameter(&self, t: MissionTime) -> f64 {
        let (index, weight) = self.locate(t);
        (index as f64 + weight) / self.curve.span_count() as f64
    }

    /// Span index and local weight at mission time `t`.
    fn locate(&self, t: MissionTime) -> (usize, f64) {
        let encounters = self.schedule.encounters();
        if t <= self.schedule.first_time() {
            return (0, 0.0);
        }
        if t >= self.schedule.last_time() {
            return (encounters.len() - 2, 1.0);
        }
        let i = self.schedule.bracket(t);
        let (t0, t1) = (encounters[i].elapsed_time, encounters[i + 1].elapsed_time);
        (i, ((t - t0) / (t1 - t0)).clamp(0.0, 1.0))
    }

    /// Pose of the probe at mission time `t`.
    pub fn pose_at(&self, t: MissionTime) -> Pose {
        let last_time = self.schedule.last_time();
        if t > last_time {
            let travelled = (t - last_time) * self.params.exit_speed;
            return Pose {
                position: self.curve.point(1.0) + self.exit_direction.into_inner() * travelled,
                facing: self.exit_direction,
            };
        }

        let (index, weight) = self.locate(t);
        let position = self.curve.segment_point(index, weight);
        let u = (index as f64 + weight) / self.curve.span_count() as f64;
        let ahead = self.curve.point((u + self.params.look_ahead).min(1.0));

        let facing = Unit::try_new(ahead - position, f64::EPSILON)
            .or_else(|| self.curve.tangent(u))
            .unwrap_or(self.exit_direction);
        Pose { position, facing }
    }

    /// Mission phase at `t`, using the configured flyby half-window.
    pub fn phase_at(&self, t: MissionTime) -> MissionPhase {
        self.schedule.phase_at(t, self.params.flyby_half_window)
    }

    /// Points along the scheduled part of the path, for drawing.
    pub fn sample(&self, segments: usize) -> Vec<Vector2<f64>> {
        self.curve.sample(segments)
    }
}

/// Per-frame driver of a probe along a [`TrajectoryPath`].
///
/// A disarmed mapper produces no pose. Arming rebuilds the path and restarts
/// mission time at zero; re-arming mid-flight discards the previous run.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryPathMapper {
    path: Option<TrajectoryPath>,
    accumulator: MappingAccumulator,
    paused: bool,
    params: TrajectoryParams,
}

impl TrajectoryPathMapper {
    pub fn new(params: TrajectoryParams) -> Self {
        TrajectoryPathMapper {
            params,
            ..Default::default()
        }
    }

    /// Build the path for `schedule` and restart mission time at zero.
    ///
    /// On error the mapper keeps its previous state.
    pub fn arm(&mut self, schedule: &EncounterSchedule) -> Result<(), OrbitError> {
        let path = TrajectoryPath::new(schedule, self.params)?;
        log::debug!(
            "mapper armed with {} encounters, last at t = {}",
            schedule.len(),
            schedule.last_time()
        );
        self.path = Some(path);
        self.accumulator.reset();
        Ok(())
    }

    pub fn disarm(&mut self) {
        if self.path.take().is_some() {
            log::debug!(
                "mapper disarmed at t = {}",
                self.accumulator.elapsed_time()
            );
        }
    }

    pub fn is_armed(&self) -> bool {
        self.path.is_some()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed_time(&self) -> MissionTime {
        self.accumulator.elapsed_time()
    }

    pub fn path(&self) -> Option<&TrajectoryPath> {
        self.path.as_ref()
    }

    /// Advance mission time by one frame and return the probe pose.
    ///
    /// Returns `None` while disarmed. While paused the accumulator is frozen
    /// and the pose of the current mission time is returned.
    pub fn advance(&mut self, frame_delta: f64, speed: f64) -> Option<Pose> {
        let path = self.path.as_ref()?;
        if !self.paused {
            self.accumulator.advance(frame_delta, speed);
        }
        Some(path.pose_at(self.accumulator.elapsed_time()))
    }
}

#[cfg(test)]
mod path_mapper_test {
    use super::*;
    use crate::trajectories::encounter::Encounter;
    use approx::assert_relative_eq;

    fn straight_schedule() -> EncounterSchedule {
        EncounterSchedule::new(vec![
            Encounter::waypoint("A", 0.0, 0.0, 0.0),
            Encounter::waypoint("B", 2.0, 4.0, 0.0),
            Encounter::waypoint("C", 4.0, 8.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_accumulator() {
        let mut acc = MappingAccumulator::default();
        assert_eq!(acc.advance(0.5, 2.0), 1.0);
        assert_eq!(acc.advance(f64::INFINITY, 1.0), 1.0);
        assert_eq!(acc.advance(1.0, -3.0), 1.0);
        assert_eq!(acc.advance(-0.5, 1.0), 1.0);
        acc.reset();
        assert_eq!(acc.elapsed_time(), 0.0);
    }

    #[test]
    fn test_anchors_are_hit_on_time() {
        let path = TrajectoryPath::new(&straight_schedule(), TrajectoryParams::default()).unwrap();
        assert_eq!(path.pose_at(-3.0).position, Vector2::new(0.0, 0.0));
        assert_eq!(path.pose_at(0.0).position, Vector2::new(0.0, 0.0));
        assert_eq!(path.pose_at(2.0).position, Vector2::new(4.0, 0.0));

        let end = path.pose_at(4.0).position;
        assert_relative_eq!(end.x, 8.0, epsilon = 1e-12);
        assert_relative_eq!(end.y, 0.0, epsilon = 1e-12);

        let mid = path.pose_at(1.0);
        assert_relative_eq!(mid.position.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(mid.facing.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(path.curve_parameter(3.0), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_exit_extrapolation() {
        let path = TrajectoryPath::new(&straight_schedule(), TrajectoryParams::default()).unwrap();
        let pose = path.pose_at(6.0);
        assert_relative_eq!(pose.position.x, 8.0 + 2.0 * 2.5, epsilon = 1e-12);
        assert_relative_eq!(pose.position.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pose.facing.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_facing_at_end_of_schedule() {
        let path = TrajectoryPath::new(&straight_schedule(), TrajectoryParams::default()).unwrap();
        // The look-ahead collapses onto the last anchor: fall back to the tangent.
        let pose = path.pose_at(4.0);
        assert_relative_eq!(pose.facing.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_anchors_are_rejected() {
        let schedule = EncounterSchedule::new(vec![
            Encounter::waypoint("A", 0.0, 1.0, 1.0),
            Encounter::waypoint("B", 1.0, 1.0, 1.0),
        ])
        .unwrap();
        assert!(matches!(
            TrajectoryPath::new(&schedule, TrajectoryParams::default()),
            Err(OrbitError::InvalidTrajectoryParameter(_))
        ));
    }

    #[test]
    fn test_mapper_lifecycle() {
        let mut mapper = TrajectoryPathMapper::default();
        assert!(mapper.advance(1.0, 1.0).is_none());

        mapper.arm(&straight_schedule()).unwrap();
        assert!(mapper.is_armed());
        let pose = mapper.advance(0.5, 2.0).unwrap();
        assert_relative_eq!(pose.position.x, 2.0, epsilon = 1e-12);

        mapper.set_paused(true);
        let frozen = mapper.advance(0.5, 2.0).unwrap();
        assert_eq!(frozen, pose);
        assert_eq!(mapper.elapsed_time(), 1.0);

        mapper.set_paused(false);
        mapper.advance(0.5, 2.0);
        assert_eq!(mapper.elapsed_time(), 2.0);

        // A negative speed does not rewind the mission.
        let held = mapper.advance(1.0, -3.0).unwrap();
        assert_eq!(mapper.elapsed_time(), 2.0);
        assert_eq!(held.position, Vector2::new(4.0, 0.0));

        // Re-arming restarts mission time.
        mapper.arm(&straight_schedule()).unwrap();
        assert_eq!(mapper.elapsed_time(), 0.0);

        mapper.disarm();
        assert!(mapper.advance(1.0, 1.0).is_none());
    }
}
