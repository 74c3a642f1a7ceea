//! # Orbit description
//!
//! Caller-supplied inputs of every propagation:
//!
//! - [`keplerian_element`](crate::orbit_type::keplerian_element): the
//!   [`KeplerianElements`](crate::orbit_type::keplerian_element::KeplerianElements) snapshot `(a, e, i, Ω, ω, θ₀)`.
//! - [`GravitationalParameter`]: μ = G·M of the central body, always explicit.
//! - [`CentralBody`]: named presets for the bodies of the Earth–Moon scenarios.
//!
//! No component owns or mutates these values: they are passed by value or by
//! reference into each call and the engine keeps no orbital state between calls.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    constants::{Kilometer, EARTH_RADIUS, MOON_RADIUS, MU_EARTH, MU_MOON},
    prop_errors::PropagationError,
};

/// Classical Keplerian elements structure and utilities.
pub mod keplerian_element;

/// Gravitational parameter μ = G·M of a central body (km³/s²).
///
/// Construction goes through [`GravitationalParameter::new`], which rejects
/// non-positive and non-finite values. There is no `Default`: the caller must
/// always say which body it is propagating around.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct GravitationalParameter(f64);

impl GravitationalParameter {
    pub fn new(mu: f64) -> Result<Self, PropagationError> {
        if mu > 0.0 && mu.is_finite() {
            Ok(GravitationalParameter(mu))
        } else {
            Err(PropagationError::InvalidGravitationalParameter(mu))
        }
    }

    /// μ in km³/s².
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for GravitationalParameter {
    type Error = PropagationError;

    fn try_from(mu: f64) -> Result<Self, Self::Error> {
        GravitationalParameter::new(mu)
    }
}

impl From<GravitationalParameter> for f64 {
    fn from(mu: GravitationalParameter) -> Self {
        mu.0
    }
}

impl fmt::Display for GravitationalParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "μ = {} km³/s²", self.0)
    }
}

/// Central bodies with known gravitational parameter and mean radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralBody {
    Earth,
    Moon,
}

impl CentralBody {
    pub fn mu(&self) -> GravitationalParameter {
        match self {
            CentralBody::Earth => GravitationalParameter(MU_EARTH),
            CentralBody::Moon => GravitationalParameter(MU_MOON),
        }
    }

    pub fn radius(&self) -> Kilometer {
        match self {
            CentralBody::Earth => EARTH_RADIUS,
            CentralBody::Moon => MOON_RADIUS,
        }
    }
}

impl fmt::Display for CentralBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CentralBody::Earth => write!(f, "Earth"),
            CentralBody::Moon => write!(f, "Moon"),
        }
    }
}
