use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PropagationError {
    #[error("Invalid eccentricity {0}: only closed elliptical orbits (0 ≤ e < 1) are supported")]
    InvalidEccentricity(f64),

    #[error("Invalid semi-major axis {0} km: must be strictly positive")]
    InvalidSemiMajorAxis(f64),

    #[error("Invalid gravitational parameter {0} km³/s²: must be strictly positive")]
    InvalidGravitationalParameter(f64),

    #[error("Invalid apsides (ra = {ra} km, rp = {rp} km)")]
    InvalidApsides { ra: f64, rp: f64 },

    #[error("Invalid sample count {0}: at least two instants are required")]
    InvalidSampleCount(usize),

    #[error("Invalid time span (t0 = {t0} s, time of flight = {time_of_flight} s)")]
    InvalidTimeSpan { t0: f64, time_of_flight: f64 },

    #[error(
        "Kepler equation did not converge after {iterations} iterations (last E = {last_estimate} rad, |ΔE| = {delta} rad)"
    )]
    ConvergenceFailure {
        last_estimate: f64,
        delta: f64,
        iterations: usize,
    },

    #[error("Unable to parse scenario: {0}")]
    ScenarioParse(String),
}

impl PropagationError {
    /// `true` for the errors describing an orbit outside the elliptical contract
    /// (eccentricity, semi-major axis, gravitational parameter, apsides).
    pub fn is_invalid_orbit(&self) -> bool {
        matches!(
            self,
            PropagationError::InvalidEccentricity(_)
                | PropagationError::InvalidSemiMajorAxis(_)
                | PropagationError::InvalidGravitationalParameter(_)
                | PropagationError::InvalidApsides { .. }
        )
    }

    /// `true` when the Newton iteration hit its cap.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, PropagationError::ConvergenceFailure { .. })
    }
}

impl From<serde_yaml::Error> for PropagationError {
    fn from(err: serde_yaml::Error) -> Self {
        PropagationError::ScenarioParse(err.to_string())
    }
}

impl PartialEq for PropagationError {
    fn eq(&self, other: &Self) -> bool {
        use PropagationError::*;
        match (self, other) {
            (InvalidEccentricity(a), InvalidEccentricity(b)) => a.to_bits() == b.to_bits(),
            (InvalidSemiMajorAxis(a), InvalidSemiMajorAxis(b)) => a.to_bits() == b.to_bits(),
            (InvalidGravitationalParameter(a), InvalidGravitationalParameter(b)) => {
                a.to_bits() == b.to_bits()
            }
            (InvalidApsides { ra: ra1, rp: rp1 }, InvalidApsides { ra: ra2, rp: rp2 }) => {
                ra1 == ra2 && rp1 == rp2
            }
            (InvalidSampleCount(a), InvalidSampleCount(b)) => a == b,
            (
                InvalidTimeSpan {
                    t0: t1,
                    time_of_flight: tof1,
                },
                InvalidTimeSpan {
                    t0: t2,
                    time_of_flight: tof2,
                },
            ) => t1 == t2 && tof1 == tof2,

            // Numerical payloads are diagnostic only: same variant is enough
            (ConvergenceFailure { .. }, ConvergenceFailure { .. }) => true,
            (ScenarioParse(_), ScenarioParse(_)) => true,

            _ => false,
        }
    }
}
