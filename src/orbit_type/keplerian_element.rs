//! # Keplerian orbital elements
//!
//! This module defines [`KeplerianElements`], the immutable snapshot describing
//! one elliptical orbit at one instant.
//!
//! ## What is carried
//!
//! 1. **a** – Semi-major axis (km), strictly positive
//! 2. **e** – Eccentricity (unitless), `0 ≤ e < 1`
//! 3. **i** – Inclination (radians)
//! 4. **Ω** – Longitude of ascending node (radians)
//! 5. **ω** – Argument of periapsis (radians)
//! 6. **θ₀** – True anomaly at epoch (radians)
//!
//! Only `a` and `e` enter the Kepler propagation. The orientation angles and
//! `θ₀` are carried through untouched so that a consumer (ground track,
//! orbit diagram) receives the full element set alongside the anomaly series.
//!
//! ## Example
//!
//! ```rust
//! use kepler_propagator::orbit_type::keplerian_element::KeplerianElements;
//!
//! // Earth–Moon transfer arc, built from its apsides
//! let transfer = KeplerianElements::from_apsides(318_200.0, 8_371.0).unwrap();
//! assert_eq!(transfer.semi_major_axis, 163_285.5);
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    constants::{Kilometer, Radian, Second},
    kepler::{check_eccentricity, principal_angle},
    orbit_type::GravitationalParameter,
    prop_errors::PropagationError,
    two_body,
};

/// Keplerian orbital elements of a closed two-body orbit.
///
/// Units
/// -----
/// * `semi_major_axis`: kilometers.
/// * `eccentricity`: unitless.
/// * `inclination`, `ascending_node_longitude`, `periapsis_argument`, `true_anomaly`: radians.
///
/// Fields are public for convenience; every propagation call re-checks them
/// with [`KeplerianElements::validate`].
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct KeplerianElements {
    pub semi_major_axis: Kilometer,
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination: Radian,
    #[serde(default)]
    pub ascending_node_longitude: Radian,
    #[serde(default)]
    pub periapsis_argument: Radian,
    #[serde(default)]
    pub true_anomaly: Radian,
}

impl KeplerianElements {
    /// Build an in-plane element set (orientation angles and `θ₀` set to zero).
    ///
    /// Errors
    /// ------
    /// * [`PropagationError::InvalidSemiMajorAxis`] if `a ≤ 0` or non-finite.
    /// * [`PropagationError::InvalidEccentricity`] if `e ∉ [0, 1)`.
    pub fn new(semi_major_axis: Kilometer, eccentricity: f64) -> Result<Self, PropagationError> {
        let elements = KeplerianElements {
            semi_major_axis,
            eccentricity,
            inclination: 0.0,
            ascending_node_longitude: 0.0,
            periapsis_argument: 0.0,
            true_anomaly: 0.0,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Build the ellipse whose apoapsis and periapsis radii are `ra` and `rp` (km).
    ///
    /// `a = (ra + rp) / 2` and `e` comes from [`two_body::eccentricity_from_apsides`],
    /// so equal apsides give an exactly circular orbit.
    pub fn from_apsides(ra: Kilometer, rp: Kilometer) -> Result<Self, PropagationError> {
        let eccentricity = two_body::eccentricity_from_apsides(ra, rp)?;
        Self::new(two_body::semi_major_axis_from_apsides(ra, rp), eccentricity)
    }

    /// Attach the orientation angles and the true anomaly at epoch. All angles
    /// are normalized into `[0, 2π)`.
    pub fn with_orientation(
        mut self,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
        true_anomaly: Radian,
    ) -> Self {
        self.inclination = principal_angle(inclination);
        self.ascending_node_longitude = principal_angle(ascending_node_longitude);
        self.periapsis_argument = principal_angle(periapsis_argument);
        self.true_anomaly = principal_angle(true_anomaly);
        self
    }

    /// Check the closed-orbit contract: `a > 0` (finite) and `0 ≤ e < 1`.
    pub fn validate(&self) -> Result<(), PropagationError> {
        two_body::check_semi_major_axis(self.semi_major_axis)?;
        check_eccentricity(self.eccentricity)
    }

    pub fn is_circular(&self) -> bool {
        self.eccentricity == 0.0
    }

    /// Periapsis radius `a(1 − e)` (km).
    pub fn periapsis_radius(&self) -> Kilometer {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Apoapsis radius `a(1 + e)` (km).
    pub fn apoapsis_radius(&self) -> Kilometer {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    pub fn semi_minor_axis(&self) -> Kilometer {
        two_body::semi_minor_axis(self.semi_major_axis, self.eccentricity)
    }

    /// Distance from the focus at true anomaly `theta` (km).
    pub fn radius_at(&self, theta: Radian) -> Kilometer {
        two_body::orbit_radius(self.semi_major_axis, self.eccentricity, theta)
    }

    /// Mean motion `n = sqrt(μ / a³)` (rad/s).
    pub fn mean_motion(&self, mu: GravitationalParameter) -> Result<f64, PropagationError> {
        two_body::mean_motion(self.semi_major_axis, mu.value())
    }

    /// Full orbital period `2π·sqrt(a³/μ)` (s).
    pub fn period(&self, mu: GravitationalParameter) -> Result<Second, PropagationError> {
        two_body::orbital_period(self.semi_major_axis, mu.value())
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Keplerian Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.3} km",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6} rad ({:.4}°)",
            self.inclination,
            self.inclination.to_degrees()
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6} rad ({:.4}°)",
            self.ascending_node_longitude,
            self.ascending_node_longitude.to_degrees()
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6} rad ({:.4}°)",
            self.periapsis_argument,
            self.periapsis_argument.to_degrees()
        )?;
        writeln!(
            f,
            "  θ   (true anomaly)          = {:.6} rad ({:.4}°)",
            self.true_anomaly,
            self.true_anomaly.to_degrees()
        )
    }
}
