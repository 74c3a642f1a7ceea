//! # Impulsive maneuvers
//!
//! Closed-form analysis of the instantaneous burns used to move between the
//! launch, parking and transfer orbits of a mission:
//!
//! - [`HohmannTransfer`] – two-impulse transfer between coplanar circular orbits.
//! - [`plane_change_delta_v`] – Δv of a pure inclination change at constant speed.
//! - [`ImpulsiveBurn`] / [`BurnKind`] – classification of a burn from the state
//!   vectors just before and just after it.
//!
//! A burn is **tangential** when it leaves both the direction of the velocity
//! vector and the flight-path angle unchanged: only the speed changes.
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Kilometer, KmPerSecond, Radian, Second},
    orbit_type::{keplerian_element::KeplerianElements, GravitationalParameter},
    prop_errors::PropagationError,
    two_body::{circular_speed, time_of_flight_hohmann, vis_viva_speed},
};

/// Angular tolerance used to decide that two directions are the same (radians).
const BURN_ANGLE_TOLERANCE: f64 = 1e-9;

/// Relative tolerance on speeds and Δv magnitudes.
const BURN_SPEED_TOLERANCE: f64 = 1e-12;

/// Hohmann transfer between two coplanar circular orbits.
///
/// Works in both directions: for a raising transfer the first burn is applied
/// at the periapsis of the transfer ellipse, for a lowering one at its apoapsis.
/// Δv values are unsigned magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HohmannTransfer {
    pub r_initial: Kilometer,
    pub r_final: Kilometer,
    /// Transfer ellipse, apsides at `r_initial` and `r_final`.
    pub transfer_orbit: KeplerianElements,
    pub v_circular_initial: KmPerSecond,
    pub v_circular_final: KmPerSecond,
    /// Speed on the transfer ellipse at `r_initial`.
    pub v_transfer_initial: KmPerSecond,
    /// Speed on the transfer ellipse at `r_final`.
    pub v_transfer_final: KmPerSecond,
    pub delta_v1: KmPerSecond,
    pub delta_v2: KmPerSecond,
    pub time_of_flight: Second,
}

impl HohmannTransfer {
    /// Build the transfer from circular radius `r_initial` to circular radius `r_final`.
    ///
    /// Errors
    /// ------
    /// * [`PropagationError::InvalidSemiMajorAxis`] if a radius is not strictly positive.
    pub fn new(
        r_initial: Kilometer,
        r_final: Kilometer,
        mu: GravitationalParameter,
    ) -> Result<Self, PropagationError> {
        let mu_value = mu.value();
        let transfer_orbit =
            KeplerianElements::from_apsides(r_initial.max(r_final), r_initial.min(r_final))
                .map_err(|_| PropagationError::InvalidSemiMajorAxis(r_initial.min(r_final)))?;
        let a = transfer_orbit.semi_major_axis;

        let v_circular_initial = circular_speed(r_initial, mu_value)?;
        let v_circular_final = circular_speed(r_final, mu_value)?;
        let v_transfer_initial = vis_viva_speed(r_initial, a, mu_value)?;
        let v_transfer_final = vis_viva_speed(r_final, a, mu_value)?;

        Ok(HohmannTransfer {
            r_initial,
            r_final,
            transfer_orbit,
            v_circular_initial,
            v_circular_final,
            v_transfer_initial,
            v_transfer_final,
            delta_v1: (v_transfer_initial - v_circular_initial).abs(),
            delta_v2: (v_circular_final - v_transfer_final).abs(),
            time_of_flight: time_of_flight_hohmann(a, mu_value)?,
        })
    }

    pub fn total_delta_v(&self) -> KmPerSecond {
        self.delta_v1 + self.delta_v2
    }

    /// Check the speed ordering expected of any Hohmann transfer:
    /// apoapsis speed < outer circular speed < inner circular speed < periapsis speed.
    ///
    /// Each comparison is made separately; a degenerate transfer (equal radii)
    /// has no strict ordering and returns `false`.
    pub fn is_velocity_ordering_consistent(&self) -> bool {
        let (v_periapsis, v_apoapsis, v_inner, v_outer) = if self.r_initial < self.r_final {
            (
                self.v_transfer_initial,
                self.v_transfer_final,
                self.v_circular_initial,
                self.v_circular_final,
            )
        } else {
            (
                self.v_transfer_final,
                self.v_transfer_initial,
                self.v_circular_final,
                self.v_circular_initial,
            )
        };

        v_apoapsis < v_outer && v_outer < v_inner && v_inner < v_periapsis
    }
}

/// Δv of a pure plane change of `delta_inclination` at constant speed `speed`:
/// `2·v·sin(|Δi|/2)`.
pub fn plane_change_delta_v(speed: KmPerSecond, delta_inclination: Radian) -> KmPerSecond {
    2.0 * speed * (0.5 * delta_inclination.abs()).sin()
}

/// Flight-path angle γ between the velocity and the local horizontal, in `[-π/2, π/2]`.
///
/// Positive while climbing from periapsis towards apoapsis.
pub fn flight_path_angle(position: &Vector3<f64>, velocity: &Vector3<f64>) -> Radian {
    position
        .dot(velocity)
        .atan2(position.cross(velocity).norm())
}

/// Angle between two vectors in `[0, π]`, accurate down to nearly parallel vectors.
fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> Radian {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Nature of an impulsive burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurnKind {
    /// Zero Δv.
    NoBurn,
    /// Speed change only: velocity direction and flight-path angle unchanged.
    Tangential,
    /// Direction change out of the orbital plane at constant speed and flight-path angle.
    PlaneChange,
    /// Anything else (radial components, combined maneuvers, ...).
    General,
}

/// An instantaneous burn at `position`, taking the velocity from
/// `velocity_before` to `velocity_after`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulsiveBurn {
    pub position: Vector3<f64>,
    pub velocity_before: Vector3<f64>,
    pub velocity_after: Vector3<f64>,
}

impl ImpulsiveBurn {
    pub fn new(
        position: Vector3<f64>,
        velocity_before: Vector3<f64>,
        velocity_after: Vector3<f64>,
    ) -> Self {
        ImpulsiveBurn {
            position,
            velocity_before,
            velocity_after,
        }
    }

    pub fn delta_v(&self) -> Vector3<f64> {
        self.velocity_after - self.velocity_before
    }

    /// Change of flight-path angle caused by the burn (radians).
    pub fn flight_path_angle_change(&self) -> Radian {
        flight_path_angle(&self.position, &self.velocity_after)
            - flight_path_angle(&self.position, &self.velocity_before)
    }

    pub fn kind(&self) -> BurnKind {
        classify_burn(&self.position, &self.velocity_before, &self.velocity_after)
    }
}

/// Classify a burn from the state just before and just after it.
pub fn classify_burn(
    position: &Vector3<f64>,
    velocity_before: &Vector3<f64>,
    velocity_after: &Vector3<f64>,
) -> BurnKind {
    let speed_before = velocity_before.norm();
    let speed_after = velocity_after.norm();
    let delta_v = velocity_after - velocity_before;

    if delta_v.norm() <= BURN_SPEED_TOLERANCE * speed_before {
        return BurnKind::NoBurn;
    }

    let gamma_unchanged = (flight_path_angle(position, velocity_after)
        - flight_path_angle(position, velocity_before))
    .abs()
        < BURN_ANGLE_TOLERANCE;

    let direction_unchanged =
        speed_after > 0.0 && angle_between(velocity_before, velocity_after) < BURN_ANGLE_TOLERANCE;

    if direction_unchanged && gamma_unchanged {
        return BurnKind::Tangential;
    }

    let speed_unchanged =
        (speed_after - speed_before).abs() <= BURN_SPEED_TOLERANCE.sqrt() * speed_before;
    let normal_before = position.cross(velocity_before);
    let normal_after = position.cross(velocity_after);
    let plane_rotated = angle_between(&normal_before, &normal_after) > BURN_ANGLE_TOLERANCE;

    if speed_unchanged && gamma_unchanged && plane_rotated {
        BurnKind::PlaneChange
    } else {
        BurnKind::General
    }
}
