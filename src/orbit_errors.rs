use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum OrbitError {
    #[error("Invalid size parameter (must be finite and > 0): {0}")]
    InvalidSizeParameter(f64),

    #[error("Invalid gravitational parameter mu (must be finite and > 0): {0}")]
    InvalidGravitationalParameter(f64),

    #[error("Invalid eccentricity (must be finite and >= 0): {0}")]
    InvalidEccentricity(f64),

    #[error("Invalid solver parameter: {0}")]
    InvalidSolverParameter(String),

    #[error("Invalid trajectory parameter: {0}")]
    InvalidTrajectoryParameter(String),

    #[error("Invalid encounter schedule: {0}")]
    InvalidEncounterSchedule(String),
}

impl PartialEq for OrbitError {
    fn eq(&self, other: &Self) -> bool {
        use OrbitError::*;
        match (self, other) {
            // NaN payloads compare equal
            (InvalidSizeParameter(a), InvalidSizeParameter(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (InvalidGravitationalParameter(a), InvalidGravitationalParameter(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (InvalidEccentricity(a), InvalidEccentricity(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }

            (InvalidSolverParameter(a), InvalidSolverParameter(b)) => a == b,
            (InvalidTrajectoryParameter(a), InvalidTrajectoryParameter(b)) => a == b,
            (InvalidEncounterSchedule(a), InvalidEncounterSchedule(b)) => a == b,

            _ => false,
        }
    }
}
