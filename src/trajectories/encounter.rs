//! Scripted encounter schedules.
//!
//! An [`EncounterSchedule`] lists where a probe must be at given mission times.
//! Each [`Encounter`] targets either an orbiting body, described by its shape
//! and its phase on the orbit at mission time zero, or a fixed waypoint of the
//! orbital plane. The schedule is validated once at construction and is
//! immutable afterwards.
//!
//! The schedule is plain configuration: it can be built in code or
//! deserialized with serde.
//!
//! ```rust
//! use orbitview::orbit_type::OrbitShape;
//! use orbitview::trajectories::encounter::{Encounter, EncounterSchedule};
//!
//! let earth = OrbitShape::new(4.5, 0.017, 10.0).unwrap();
//! let jupiter = OrbitShape::new(12.0, 0.049, 10.0).unwrap();
//!
//! let schedule = EncounterSchedule::new(vec![
//!     Encounter::body("Earth", 0.0, earth, 5.71),
//!     Encounter::body("Jupiter", 1.7, jupiter, 1.57),
//!     Encounter::waypoint("Exit", 6.0, 40.0, 25.0),
//! ])
//! .unwrap();
//! assert_eq!(schedule.len(), 3);
//! ```
use itertools::Itertools;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{MissionTime, Radian},
    orbit_errors::OrbitError,
    orbit_type::OrbitShape,
    propagator::OrbitPropagator,
};

/// What the probe must reach at an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EncounterTarget {
    /// An orbiting body at mean anomaly `phase_offset` when the mission starts.
    Body {
        shape: OrbitShape,
        phase_offset: Radian,
    },
    /// A fixed point of the orbital plane.
    Waypoint { x: f64, y: f64 },
}

impl EncounterTarget {
    /// Position of the target at mission time `elapsed_time`.
    ///
    /// A body started at phase `φ` has been travelling for `φ/n + τ` since
    /// periapsis at mission time `τ`, with `n` its own mean motion.
    pub fn position_at(&self, elapsed_time: MissionTime) -> Vector2<f64> {
        match self {
            EncounterTarget::Body {
                shape,
                phase_offset,
            } => {
                let t = phase_offset / shape.mean_motion() + elapsed_time;
                OrbitPropagator::new(shape).state(t).position()
            }
            EncounterTarget::Waypoint { x, y } => Vector2::new(*x, *y),
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, EncounterTarget::Body { .. })
    }
}

/// One scripted encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    #[serde(default)]
    pub name: String,
    /// Mission time of the encounter.
    pub elapsed_time: MissionTime,
    pub target: EncounterTarget,
}

impl Encounter {
    pub fn body(
        name: impl Into<String>,
        elapsed_time: MissionTime,
        shape: OrbitShape,
        phase_offset: Radian,
    ) -> Self {
        Encounter {
            name: name.into(),
            elapsed_time,
            target: EncounterTarget::Body {
                shape,
                phase_offset,
            },
        }
    }

    pub fn waypoint(name: impl Into<String>, elapsed_time: MissionTime, x: f64, y: f64) -> Self {
        Encounter {
            name: name.into(),
            elapsed_time,
            target: EncounterTarget::Waypoint { x, y },
        }
    }

    /// Where the probe must be at this encounter.
    pub fn anchor(&self) -> Vector2<f64> {
        self.target.position_at(self.elapsed_time)
    }
}

/// Mission phase of a probe following a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionPhase {
    /// Before the first flyby window.
    Launch,
    /// Travelling toward the encounter at this index.
    Cruise { target: usize },
    /// Inside the flyby window of the body encounter at this index.
    Flyby { target: usize },
    /// Past the flyby window of the last body encounter.
    Interstellar,
}

/// Ordered, validated list of encounters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Encounter>", into = "Vec<Encounter>")]
pub struct EncounterSchedule {
    encounters: Vec<Encounter>,
}

impl EncounterSchedule {
    /// Validate and build a schedule.
    ///
    /// Errors
    /// ----------
    /// [`OrbitError::InvalidEncounterSchedule`] when
    /// * fewer than two encounters are given,
    /// * an elapsed time or a waypoint coordinate is not finite,
    /// * elapsed times are not strictly increasing.
    pub fn new(encounters: Vec<Encounter>) -> Result<Self, OrbitError> {
        if encounters.len() < 2 {
            return Err(OrbitError::InvalidEncounterSchedule(format!(
                "at least two encounters are required, got {}",
                encounters.len()
            )));
        }

        if let Some(bad) = encounters.iter().find(|enc| {
            let waypoint_ok = match enc.target {
                EncounterTarget::Waypoint { x, y } => x.is_finite() && y.is_finite(),
                EncounterTarget::Body { phase_offset, .. } => phase_offset.is_finite(),
            };
            !(enc.elapsed_time.is_finite() && waypoint_ok)
        }) {
            return Err(OrbitError::InvalidEncounterSchedule(format!(
                "encounter '{}' has a non-finite time or position",
                bad.name
            )));
        }

        if let Some((prev, next)) = encounters
            .iter()
            .tuple_windows()
            .find(|(prev, next)| next.elapsed_time <= prev.elapsed_time)
        {
            return Err(OrbitError::InvalidEncounterSchedule(format!(
                "encounter times must be strictly increasing ('{}' at {} then '{}' at {})",
                prev.name, prev.elapsed_time, next.name, next.elapsed_time
            )));
        }

        log::debug!(
            "encounter schedule of {} encounters over [{}, {}]",
            encounters.len(),
            encounters[0].elapsed_time,
            encounters[encounters.len() - 1].elapsed_time
        );
        Ok(EncounterSchedule { encounters })
    }

    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    /// Always `false`: a valid schedule holds at least two encounters.
    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }

    pub fn first_time(&self) -> MissionTime {
        self.encounters[0].elapsed_time
    }

    pub fn last_time(&self) -> MissionTime {
        self.encounters[self.encounters.len() - 1].elapsed_time
    }

    /// Anchor points, one per encounter, in schedule order.
    pub fn anchors(&self) -> Vec<Vector2<f64>> {
        self.encounters.iter().map(Encounter::anchor).collect()
    }

    /// Index `i` of the interval `[τᵢ, τᵢ₊₁]` containing `t`, clamped to the schedule span.
    pub fn bracket(&self, t: MissionTime) -> usize {
        let last_interval = self.encounters.len() - 2;
        self.encounters[1..]
            .iter()
            .position(|enc| t < enc.elapsed_time)
            .unwrap_or(last_interval)
            .min(last_interval)
    }

    /// Classify mission time `t`.
    ///
    /// Every body encounter after the first one (the departure) opens a flyby
    /// window `[τᵢ - half_window, τᵢ + half_window]`. Waypoints never open a
    /// window. Between windows the probe cruises toward the next flyby; before
    /// the first window it is launching and after the last one it is
    /// interstellar.
    pub fn phase_at(&self, t: MissionTime, half_window: f64) -> MissionPhase {
        let flybys: Vec<(usize, MissionTime)> = self
            .encounters
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, enc)| enc.target.is_body())
            .map(|(i, enc)| (i, enc.elapsed_time))
            .collect();

        let Some(&(_, first_time)) = flybys.first() else {
            return if t < self.last_time() {
                MissionPhase::Launch
            } else {
                MissionPhase::Interstellar
            };
        };

        if let Some(&(index, _)) = flybys
            .iter()
            .find(|(_, tau)| (t - tau).abs() <= half_window)
        {
            return MissionPhase::Flyby { target: index };
        }
        if t < first_time - half_window {
            return MissionPhase::Launch;
        }
        match flybys.iter().find(|(_, tau)| t < *tau) {
            Some(&(index, _)) => MissionPhase::Cruise { target: index },
            None => MissionPhase::Interstellar,
        }
    }
}

impl TryFrom<Vec<Encounter>> for EncounterSchedule {
    type Error = OrbitError;

    fn try_from(encounters: Vec<Encounter>) -> Result<Self, Self::Error> {
        EncounterSchedule::new(encounters)
    }
}

impl From<EncounterSchedule> for Vec<Encounter> {
    fn from(schedule: EncounterSchedule) -> Self {
        schedule.encounters
    }
}

#[cfg(test)]
mod encounter_test {
    use super::*;
    use approx::assert_relative_eq;

    fn planet(a: f64, e: f64) -> OrbitShape {
        OrbitShape::new(a, e, 10.0).unwrap()
    }

    fn grand_tour() -> EncounterSchedule {
        EncounterSchedule::new(vec![
            Encounter::body("Earth", 0.0, planet(4.5, 0.017), 5.71),
            Encounter::body("Jupiter", 1.7, planet(12.0, 0.049), 1.57),
            Encounter::body("Saturn", 3.5, planet(18.0, 0.056), 2.46),
            Encounter::body("Uranus", 8.0, planet(26.0, 0.046), 3.80),
            Encounter::body("Neptune", 12.0, planet(35.0, 0.009), 4.41),
            Encounter::waypoint("Exit", 18.0, 60.0, -20.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_body_anchor_uses_own_phase() {
        let shape = planet(12.0, 0.049);
        let target = EncounterTarget::Body {
            shape,
            phase_offset: 1.57,
        };
        let expected = OrbitPropagator::new(&shape)
            .state(1.57 / shape.mean_motion() + 1.7)
            .position();
        assert_eq!(target.position_at(1.7), expected);
        assert_eq!(
            EncounterTarget::Waypoint { x: 3.0, y: -2.0 }.position_at(99.0),
            Vector2::new(3.0, -2.0)
        );
    }

    #[test]
    fn test_schedule_validation() {
        let shape = planet(5.0, 0.1);
        assert!(matches!(
            EncounterSchedule::new(vec![Encounter::body("A", 0.0, shape, 0.0)]),
            Err(OrbitError::InvalidEncounterSchedule(_))
        ));
        assert!(EncounterSchedule::new(vec![
            Encounter::body("A", 0.0, shape, 0.0),
            Encounter::body("B", 0.0, shape, 1.0),
        ])
        .is_err());
        assert!(EncounterSchedule::new(vec![
            Encounter::body("A", 2.0, shape, 0.0),
            Encounter::body("B", 1.0, shape, 1.0),
        ])
        .is_err());
        assert!(EncounterSchedule::new(vec![
            Encounter::body("A", 0.0, shape, 0.0),
            Encounter::waypoint("B", 1.0, f64::NAN, 1.0),
        ])
        .is_err());
        assert!(EncounterSchedule::new(vec![
            Encounter::body("A", f64::NEG_INFINITY, shape, 0.0),
            Encounter::waypoint("B", 1.0, 0.0, 1.0),
        ])
        .is_err());
    }

    #[test]
    fn test_bracket() {
        let schedule = grand_tour();
        assert_eq!(schedule.bracket(-1.0), 0);
        assert_eq!(schedule.bracket(0.0), 0);
        assert_eq!(schedule.bracket(1.7), 1);
        assert_eq!(schedule.bracket(5.0), 2);
        assert_eq!(schedule.bracket(17.9), 4);
        assert_eq!(schedule.bracket(18.0), 4);
        assert_eq!(schedule.bracket(50.0), 4);
    }

    #[test]
    fn test_mission_phases() {
        let schedule = grand_tour();
        let w = 0.3;
        assert_eq!(schedule.phase_at(0.0, w), MissionPhase::Launch);
        assert_eq!(schedule.phase_at(1.3, w), MissionPhase::Launch);
        assert_eq!(schedule.phase_at(1.6, w), MissionPhase::Flyby { target: 1 });
        assert_eq!(schedule.phase_at(2.5, w), MissionPhase::Cruise { target: 2 });
        assert_eq!(schedule.phase_at(3.5, w), MissionPhase::Flyby { target: 2 });
        assert_eq!(schedule.phase_at(10.0, w), MissionPhase::Cruise { target: 4 });
        assert_eq!(schedule.phase_at(12.2, w), MissionPhase::Flyby { target: 4 });
        assert_eq!(schedule.phase_at(12.5, w), MissionPhase::Interstellar);
        // Waypoints do not open a flyby window.
        assert_eq!(schedule.phase_at(18.0, w), MissionPhase::Interstellar);
    }

    #[test]
    fn test_schedule_from_json() {
        let json = r#"[
            {"name": "Earth", "elapsed_time": 0.0,
             "target": {"kind": "body", "shape": {"size_param": 4.5, "eccentricity": 0.017, "mu": 10.0}, "phase_offset": 5.71}},
            {"name": "Exit", "elapsed_time": 3.0,
             "target": {"kind": "waypoint", "x": 20.0, "y": 20.0}}
        ]"#;
        let schedule: EncounterSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_relative_eq!(schedule.last_time(), 3.0);
        assert_eq!(schedule.anchors()[1], Vector2::new(20.0, 20.0));

        let unordered = r#"[
            {"elapsed_time": 1.0, "target": {"kind": "waypoint", "x": 0.0, "y": 0.0}},
            {"elapsed_time": 0.5, "target": {"kind": "waypoint", "x": 1.0, "y": 0.0}}
        ]"#;
        assert!(serde_json::from_str::<EncounterSchedule>(unordered).is_err());
    }
}
