//! # Anomaly propagation
//!
//! Steps an elliptical orbit forward in time and reports the true anomaly at
//! evenly spaced instants.
//!
//! ## Algorithm
//!
//! 1. Validate the orbit (`a > 0`, `0 ≤ e < 1`), μ and the time window, before any sampling.
//! 2. Compute the mean motion `n = sqrt(μ / a³)`.
//! 3. Sample `N` evenly spaced instants `t₀ … t_{N−1}` across `[t0, t0 + TOF]`, both ends included.
//! 4. For every consecutive pair `(t_i, t_{i+1})` compute `M = n·(t_{i+1} − t0) mod 2π`
//!    and solve Kepler's equation for the true anomaly. The sample is anchored at `t_{i+1}`.
//!
//! The resulting [`AnomalySeries`] therefore holds **`N − 1` samples**: the
//! initial instant itself is never reported.
//!
//! ## Failure policy
//!
//! Any solver error aborts the whole call. A series is either complete or not
//! returned at all; there is no truncated or padded output.
//!
//! ## Parallelism
//!
//! Samples are independent of one another, so
//! [`AnomalyPropagator::propagate_par`] spreads them over the rayon thread
//! pool. Its output is identical to [`AnomalyPropagator::propagate`].
//!
//! ## Example
//!
//! ```rust
//! use kepler_propagator::orbit_type::{keplerian_element::KeplerianElements, CentralBody};
//! use kepler_propagator::propagator::{AnomalyPropagator, SamplingMode, TimeSpan};
//! use kepler_propagator::two_body::orbital_period;
//!
//! let parking = KeplerianElements::new(8_371.0, 0.0).unwrap();
//! let mu = CentralBody::Earth.mu();
//! let period = orbital_period(parking.semi_major_axis, mu.value()).unwrap();
//!
//! let span = TimeSpan::new(0.0, period, SamplingMode::Coarse).unwrap();
//! let series = AnomalyPropagator::default().propagate(&parking, mu, &span).unwrap();
//! assert_eq!(series.len(), 10);
//! ```
use itertools::{izip, multiunzip};
use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Day, Kilometer, Radian, Second},
    kepler::{principal_angle, KeplerSolver},
    orbit_type::{keplerian_element::KeplerianElements, GravitationalParameter},
    prop_errors::PropagationError,
    time::{linspace, seconds_to_days},
};

/// Density of the sampled instants.
///
/// Every mode produces evenly spaced instants over the whole window; they only
/// differ in how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// [`SamplingMode::COARSE_SAMPLES`] instants, for short transfer arcs.
    Coarse,
    /// [`SamplingMode::DENSE_SAMPLES`] instants, for multi-orbit windows.
    Dense,
    /// Caller-chosen number of instants (at least 2).
    Custom(usize),
}

impl SamplingMode {
    pub const COARSE_SAMPLES: usize = 11;
    pub const DENSE_SAMPLES: usize = 10_000;

    pub fn sample_count(&self) -> usize {
        match self {
            SamplingMode::Coarse => Self::COARSE_SAMPLES,
            SamplingMode::Dense => Self::DENSE_SAMPLES,
            SamplingMode::Custom(count) => *count,
        }
    }
}

/// Propagation window, expressed as time since periapsis passage (not wall-clock time).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Start of the window, seconds since periapsis passage.
    pub t0: Second,
    /// Length of the window in seconds, strictly positive.
    pub time_of_flight: Second,
    pub sampling: SamplingMode,
}

impl TimeSpan {
    pub fn new(
        t0: Second,
        time_of_flight: Second,
        sampling: SamplingMode,
    ) -> Result<Self, PropagationError> {
        let span = TimeSpan {
            t0,
            time_of_flight,
            sampling,
        };
        span.validate()?;
        Ok(span)
    }

    /// Window of `sample_count` instants, the raw form used by [`propagate`].
    pub fn with_sample_count(
        t0: Second,
        time_of_flight: Second,
        sample_count: usize,
    ) -> Result<Self, PropagationError> {
        Self::new(t0, time_of_flight, SamplingMode::Custom(sample_count))
    }

    pub fn sample_count(&self) -> usize {
        self.sampling.sample_count()
    }

    /// End of the window, `t0 + TOF`.
    pub fn end(&self) -> Second {
        self.t0 + self.time_of_flight
    }

    /// Check that the window is finite, has positive length and holds at least two instants.
    pub fn validate(&self) -> Result<(), PropagationError> {
        if !(self.t0.is_finite() && self.time_of_flight.is_finite() && self.time_of_flight > 0.0)
        {
            return Err(PropagationError::InvalidTimeSpan {
                t0: self.t0,
                time_of_flight: self.time_of_flight,
            });
        }
        if self.sample_count() < 2 {
            return Err(PropagationError::InvalidSampleCount(self.sample_count()));
        }
        Ok(())
    }

    /// The sampled instants in seconds, first `t0`, last `t0 + TOF`.
    pub fn instants(&self) -> Vec<Second> {
        linspace(self.t0, self.end(), self.sample_count())
    }
}

/// One propagated point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalySample {
    /// Time since periapsis passage, in days.
    pub time: Day,
    /// Mean anomaly in `[0, 2π)`.
    pub mean_anomaly: Radian,
    /// True anomaly in `[0, 2π)`.
    pub true_anomaly: Radian,
}

/// Propagation output: parallel sequences of equal length, in chronological order.
///
/// Times are strictly increasing and every anomaly lies in `[0, 2π)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnomalySeries {
    times: Vec<Day>,
    mean_anomalies: Vec<Radian>,
    true_anomalies: Vec<Radian>,
}

impl AnomalySeries {
    /// Times since periapsis passage, in days.
    pub fn times(&self) -> &[Day] {
        &self.times
    }

    pub fn mean_anomalies(&self) -> &[Radian] {
        &self.mean_anomalies
    }

    pub fn true_anomalies(&self) -> &[Radian] {
        &self.true_anomalies
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<AnomalySample> {
        Some(AnomalySample {
            time: *self.times.get(index)?,
            mean_anomaly: self.mean_anomalies[index],
            true_anomaly: self.true_anomalies[index],
        })
    }

    pub fn first(&self) -> Option<AnomalySample> {
        self.get(0)
    }

    pub fn last(&self) -> Option<AnomalySample> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Iterate over the samples in chronological order.
    pub fn samples(&self) -> impl Iterator<Item = AnomalySample> + '_ {
        izip!(&self.times, &self.mean_anomalies, &self.true_anomalies).map(
            |(&time, &mean_anomaly, &true_anomaly)| AnomalySample {
                time,
                mean_anomaly,
                true_anomaly,
            },
        )
    }

    /// Consume the series into its `(times, mean anomalies, true anomalies)` columns.
    pub fn into_columns(self) -> (Vec<Day>, Vec<Radian>, Vec<Radian>) {
        (self.times, self.mean_anomalies, self.true_anomalies)
    }
}

impl FromIterator<AnomalySample> for AnomalySeries {
    fn from_iter<I: IntoIterator<Item = AnomalySample>>(iter: I) -> Self {
        let (times, mean_anomalies, true_anomalies): (Vec<Day>, Vec<Radian>, Vec<Radian>) = multiunzip(
            iter.into_iter()
                .map(|s| (s.time, s.mean_anomaly, s.true_anomaly)),
        );
        AnomalySeries {
            times,
            mean_anomalies,
            true_anomalies,
        }
    }
}

/// Drives a [`KeplerSolver`] over a sampled time window.
///
/// Holds no state besides its solver; every call builds a fresh series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnomalyPropagator {
    solver: KeplerSolver,
}

impl AnomalyPropagator {
    pub fn new(solver: KeplerSolver) -> Self {
        AnomalyPropagator { solver }
    }

    pub fn solver(&self) -> &KeplerSolver {
        &self.solver
    }

    /// Mean anomalies of the window, one per instant after `t0`.
    ///
    /// Arguments
    /// ---------
    /// * `elements` – Orbit to propagate (only `a` is used here).
    /// * `mu` – Gravitational parameter of the central body.
    /// * `span` – Propagation window.
    ///
    /// Return
    /// ------
    /// * `(instant, M)` pairs, instants in seconds, `M = n·(t_{i+1} − t0) mod 2π`.
    pub fn mean_anomalies(
        &self,
        elements: &KeplerianElements,
        mu: GravitationalParameter,
        span: &TimeSpan,
    ) -> Result<Vec<(Second, Radian)>, PropagationError> {
        elements.validate()?;
        span.validate()?;
        let mean_motion = elements.mean_motion(mu)?;

        Ok(span.instants()[1..]
            .iter()
            .map(|&instant| {
                (
                    instant,
                    principal_angle(mean_motion * (instant - span.t0)),
                )
            })
            .collect())
    }

    /// Propagate `elements` over `span` and return the true-anomaly series.
    ///
    /// Errors
    /// ------
    /// * [`PropagationError::InvalidSemiMajorAxis`] / [`PropagationError::InvalidEccentricity`] /
    ///   [`PropagationError::InvalidGravitationalParameter`] – rejected before sampling.
    /// * [`PropagationError::InvalidTimeSpan`] / [`PropagationError::InvalidSampleCount`] – bad window.
    /// * [`PropagationError::ConvergenceFailure`] – first sample whose Kepler solve failed;
    ///   no partial series is returned.
    pub fn propagate(
        &self,
        elements: &KeplerianElements,
        mu: GravitationalParameter,
        span: &TimeSpan,
    ) -> Result<AnomalySeries, PropagationError> {
        let mean_anomalies = self.mean_anomalies(elements, mu, span)?;

        let samples = mean_anomalies
            .iter()
            .map(|&(instant, mean_anomaly)| self.sample(instant, mean_anomaly, elements))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Propagated {} samples over [{}, {}] s (a = {} km, e = {})",
            samples.len(),
            span.t0,
            span.end(),
            elements.semi_major_axis,
            elements.eccentricity
        );
        Ok(samples.into_iter().collect())
    }

    /// Parallel version of [`AnomalyPropagator::propagate`], same output and errors.
    pub fn propagate_par(
        &self,
        elements: &KeplerianElements,
        mu: GravitationalParameter,
        span: &TimeSpan,
    ) -> Result<AnomalySeries, PropagationError> {
        let mean_anomalies = self.mean_anomalies(elements, mu, span)?;

        let samples = mean_anomalies
            .par_iter()
            .map(|&(instant, mean_anomaly)| self.sample(instant, mean_anomaly, elements))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Propagated {} samples in parallel over [{}, {}] s",
            samples.len(),
            span.t0,
            span.end()
        );
        Ok(samples.into_iter().collect())
    }

    fn sample(
        &self,
        instant: Second,
        mean_anomaly: Radian,
        elements: &KeplerianElements,
    ) -> Result<AnomalySample, PropagationError> {
        let true_anomaly = self.solver.solve(mean_anomaly, elements.eccentricity)?;
        trace!("t = {instant} s: M = {mean_anomaly}, θ = {true_anomaly}");

        Ok(AnomalySample {
            time: seconds_to_days(instant),
            mean_anomaly,
            true_anomaly,
        })
    }
}

/// Propagate from raw scalars, with the default solver settings.
///
/// Arguments
/// ---------
/// * `t0` – Start of the window, seconds since periapsis passage.
/// * `time_of_flight` – Window length in seconds.
/// * `semi_major_axis` – km.
/// * `mu` – Gravitational parameter, km³/s².
/// * `sample_count` – Number of sampled instants; the series holds `sample_count − 1` samples.
/// * `eccentricity` – `0 ≤ e < 1`.
pub fn propagate(
    t0: Second,
    time_of_flight: Second,
    semi_major_axis: Kilometer,
    mu: f64,
    sample_count: usize,
    eccentricity: f64,
) -> Result<AnomalySeries, PropagationError> {
    let elements = KeplerianElements::new(semi_major_axis, eccentricity)?;
    let mu = GravitationalParameter::new(mu)?;
    let span = TimeSpan::with_sample_count(t0, time_of_flight, sample_count)?;

    AnomalyPropagator::default().propagate(&elements, mu, &span)
}
