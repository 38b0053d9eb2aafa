//! # Simulation clocks
//!
//! Per-body time accumulators driven by the host's frame loop.
//!
//! A [`BodyClock`] counts the time since periapsis of one simulated body. It
//! advances by `frame_delta × speed` on every unpaused frame, and can start
//! from a **phase offset**: a body placed at mean anomaly `φ` on its orbit
//! starts at `t = φ / n`, with `n` the mean motion of its shape.
//!
//! An [`OrbitingBody`] pairs a clock with the propagator of the body's shape
//! and returns its state every frame. Each body owns its clock; nothing is
//! shared between bodies.
//!
//! Time advancement is an explicit input: the clock never reads a wall clock.
use crate::{
    constants::{Radian, TimeSincePeriapsis},
    orbit_type::OrbitShape,
    propagator::{OrbitPropagator, State},
};

/// Time accumulator of one body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyClock {
    start: TimeSincePeriapsis,
    elapsed: TimeSincePeriapsis,
    paused: bool,
}

impl BodyClock {
    /// Clock starting at `start` time units after periapsis.
    pub fn new(start: TimeSincePeriapsis) -> Self {
        BodyClock {
            start,
            elapsed: start,
            paused: false,
        }
    }

    /// Clock starting at mean anomaly `phase_offset` on `shape`.
    pub fn with_phase_offset(shape: &OrbitShape, phase_offset: Radian) -> Self {
        BodyClock::new(phase_offset / shape.mean_motion())
    }

    /// Current time since periapsis.
    pub fn elapsed(&self) -> TimeSincePeriapsis {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advance by `frame_delta × speed` unless paused; returns the new time.
    ///
    /// Non-finite steps are ignored.
    pub fn advance(&mut self, frame_delta: f64, speed: f64) -> TimeSincePeriapsis {
        let step = frame_delta * speed;
        if !self.paused && step.is_finite() {
            self.elapsed += step;
        }
        self.elapsed
    }

    /// Return to the starting time.
    pub fn reset(&mut self) {
        self.elapsed = self.start;
    }
}

/// A body moving on a fixed orbit, driven by its own clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitingBody {
    propagator: OrbitPropagator,
    clock: BodyClock,
}

impl OrbitingBody {
    pub fn new(shape: &OrbitShape, clock: BodyClock) -> Self {
        OrbitingBody {
            propagator: OrbitPropagator::new(shape),
            clock,
        }
    }

    pub fn shape(&self) -> &OrbitShape {
        self.propagator.shape()
    }

    pub fn clock(&self) -> &BodyClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut BodyClock {
        &mut self.clock
    }

    /// State at the clock's current time, without advancing.
    pub fn state(&self) -> State {
        self.propagator.state(self.clock.elapsed())
    }

    /// Advance the clock by one frame and return the new state.
    pub fn step(&mut self, frame_delta: f64, speed: f64) -> State {
        let t = self.clock.advance(frame_delta, speed);
        self.propagator.state(t)
    }
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clock_advance_and_pause() {
        let mut clock = BodyClock::new(-7.0);
        assert_eq!(clock.advance(0.5, 2.0), -6.0);

        clock.set_paused(true);
        assert_eq!(clock.advance(0.5, 2.0), -6.0);

        clock.set_paused(false);
        assert_eq!(clock.advance(f64::NAN, 1.0), -6.0);
        assert_eq!(clock.advance(0.25, 4.0), -5.0);

        clock.reset();
        assert_eq!(clock.elapsed(), -7.0);
    }

    #[test]
    fn test_phase_offset_sets_mean_anomaly() {
        let shape = OrbitShape::new(12.0, 0.049, 10.0).unwrap();
        let clock = BodyClock::with_phase_offset(&shape, 1.57);
        assert_relative_eq!(clock.elapsed() * shape.mean_motion(), 1.57, epsilon = 1e-12);
    }

    #[test]
    fn test_orbiting_body_follows_propagator() {
        let shape = OrbitShape::new(5.0, 0.5, 10.0).unwrap();
        let mut body = OrbitingBody::new(&shape, BodyClock::default());
        assert_relative_eq!(body.state().r, 2.5, epsilon = 1e-12);

        let propagator = OrbitPropagator::new(&shape);
        let mut expected_t = 0.0;
        for _ in 0..60 {
            let s = body.step(1.0 / 60.0, 3.0);
            expected_t += 3.0 / 60.0;
            assert_eq!(s, propagator.state(body.clock().elapsed()));
            assert_relative_eq!(body.clock().elapsed(), expected_t, epsilon = 1e-12);
        }
    }
}
