//! # Propagation scenarios
//!
//! A [`Scenario`] bundles everything one propagation run needs (central body,
//! orbit, time window and sampling density) as plain data that can be written
//! by hand in YAML or built in code. Nothing here reads files, environment
//! variables or global state: the caller hands the scenario text (or value) in,
//! and [`Scenario::run`] hands an [`AnomalySeries`] back.
//!
//! ## YAML layout
//!
//! ```yaml
//! name: Earth to Moon transfer
//! gravity:
//!   body: earth            # or `mu: 398600.0`
//! orbit:
//!   apsides:               # or `elements: { semi_major_axis: ..., eccentricity: ... }`
//!     ra: 318200.0
//!     rp: 8371.0
//! t0: 0.0                  # seconds since periapsis passage
//! time_of_flight: hohmann_half_period   # or `seconds: 1234.5` / `periods: 5.0`
//! sampling: coarse         # or `dense` / `custom: 500`
//! ```
//!
//! ## Presets
//!
//! [`Scenario::earth_moon_transfer`], [`Scenario::moon_lowering_transfer`] and
//! [`Scenario::lunar_orbit`] reproduce the three legs of the Earth–Moon mission.
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Kilometer, Second},
    orbit_type::{keplerian_element::KeplerianElements, CentralBody, GravitationalParameter},
    prop_errors::PropagationError,
    propagator::{AnomalyPropagator, AnomalySeries, SamplingMode, TimeSpan},
    two_body::{orbital_period, time_of_flight_hohmann},
};

/// Where μ comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    Body(CentralBody),
    Mu(GravitationalParameter),
}

impl Gravity {
    pub fn mu(&self) -> GravitationalParameter {
        match self {
            Gravity::Body(body) => body.mu(),
            Gravity::Mu(mu) => *mu,
        }
    }
}

/// How the orbit is described.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitSpec {
    /// Apoapsis and periapsis radii (km).
    Apsides { ra: Kilometer, rp: Kilometer },
    Elements(KeplerianElements),
}

impl OrbitSpec {
    pub fn elements(&self) -> Result<KeplerianElements, PropagationError> {
        match self {
            OrbitSpec::Apsides { ra, rp } => KeplerianElements::from_apsides(*ra, *rp),
            OrbitSpec::Elements(elements) => {
                elements.validate()?;
                Ok(*elements)
            }
        }
    }
}

/// Length of the propagation window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightTime {
    Seconds(Second),
    /// Half a period of the orbit: periapsis to apoapsis.
    HohmannHalfPeriod,
    /// A number of full orbital periods.
    Periods(f64),
}

impl FlightTime {
    pub fn seconds(
        &self,
        elements: &KeplerianElements,
        mu: GravitationalParameter,
    ) -> Result<Second, PropagationError> {
        match self {
            FlightTime::Seconds(seconds) => Ok(*seconds),
            FlightTime::HohmannHalfPeriod => {
                time_of_flight_hohmann(elements.semi_major_axis, mu.value())
            }
            FlightTime::Periods(count) => {
                Ok(count * orbital_period(elements.semi_major_axis, mu.value())?)
            }
        }
    }
}

/// One propagation run described as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub gravity: Gravity,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub orbit: OrbitSpec,
    #[serde(default)]
    pub t0: Second,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub time_of_flight: FlightTime,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub sampling: SamplingMode,
}

/// Everything a scenario resolved to, plus the propagated series.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub elements: KeplerianElements,
    pub mu: GravitationalParameter,
    pub span: TimeSpan,
    pub series: AnomalySeries,
}

impl Scenario {
    /// Parse a scenario from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, PropagationError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, PropagationError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Earth parking orbit (rp = 8371 km) to lunar distance (ra = 318200 km),
    /// half a transfer period, coarse sampling.
    pub fn earth_moon_transfer() -> Self {
        Scenario {
            name: "Earth to Moon transfer".into(),
            gravity: Gravity::Body(CentralBody::Earth),
            orbit: OrbitSpec::Apsides {
                ra: 318_200.0,
                rp: 8_371.0,
            },
            t0: 0.0,
            time_of_flight: FlightTime::HohmannHalfPeriod,
            sampling: SamplingMode::Coarse,
        }
    }

    /// Moon sphere of influence down to the final lunar orbit.
    ///
    /// The arc keeps a = 61424 km while its eccentricity comes from the
    /// apsides ra = 66200 km, rp = 4905 km.
    pub fn moon_lowering_transfer() -> Self {
        let (ra, rp) = (66_200.0, 4_905.0);
        Scenario {
            name: "Moon SOI to final orbit transfer".into(),
            gravity: Gravity::Body(CentralBody::Moon),
            orbit: OrbitSpec::Elements(KeplerianElements {
                semi_major_axis: 61_424.0,
                eccentricity: (ra - rp) / (ra + rp),
                inclination: 0.0,
                ascending_node_longitude: 0.0,
                periapsis_argument: 0.0,
                true_anomaly: 0.0,
            }),
            t0: 0.0,
            time_of_flight: FlightTime::HohmannHalfPeriod,
            sampling: SamplingMode::Coarse,
        }
    }

    /// Five periods of the circular lunar orbit (a = 56648 km), dense sampling.
    pub fn lunar_orbit() -> Self {
        Scenario {
            name: "Lunar orbit for 5 periods".into(),
            gravity: Gravity::Body(CentralBody::Moon),
            orbit: OrbitSpec::Elements(KeplerianElements {
                semi_major_axis: 56_648.0,
                eccentricity: 0.0,
                inclination: 0.0,
                ascending_node_longitude: 0.0,
                periapsis_argument: 0.0,
                true_anomaly: 0.0,
            }),
            t0: 0.0,
            time_of_flight: FlightTime::Periods(5.0),
            sampling: SamplingMode::Dense,
        }
    }

    /// The three legs of the Earth–Moon mission, in flight order.
    pub fn mission() -> Vec<Self> {
        vec![
            Self::earth_moon_transfer(),
            Self::moon_lowering_transfer(),
            Self::lunar_orbit(),
        ]
    }

    /// Resolve the scenario into validated elements, μ and time window.
    pub fn resolve(
        &self,
    ) -> Result<(KeplerianElements, GravitationalParameter, TimeSpan), PropagationError> {
        let elements = self.orbit.elements()?;
        let mu = self.gravity.mu();
        let time_of_flight = self.time_of_flight.seconds(&elements, mu)?;
        let span = TimeSpan::new(self.t0, time_of_flight, self.sampling)?;

        Ok((elements, mu, span))
    }

    /// Resolve and propagate with the given propagator.
    pub fn run_with(
        &self,
        propagator: &AnomalyPropagator,
    ) -> Result<ScenarioOutcome, PropagationError> {
        let (elements, mu, span) = self.resolve()?;
        info!(
            "Running scenario '{}': a = {} km, e = {:.6}, {}, TOF = {:.3} s, {} instants",
            self.name,
            elements.semi_major_axis,
            elements.eccentricity,
            mu,
            span.time_of_flight,
            span.sample_count()
        );

        let series = propagator.propagate_par(&elements, mu, &span)?;

        Ok(ScenarioOutcome {
            name: self.name.clone(),
            elements,
            mu,
            span,
            series,
        })
    }

    /// Resolve and propagate with the default solver settings.
    pub fn run(&self) -> Result<ScenarioOutcome, PropagationError> {
        self.run_with(&AnomalyPropagator::default())
    }
}
