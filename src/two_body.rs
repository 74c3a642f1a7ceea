//! # Two-body conic helpers
//!
//! Pure closed-form relations of the unperturbed two-body problem, for
//! elliptical orbits around a central body of gravitational parameter `μ`.
//!
//! | Function | Relation |
//! |---|---|
//! | [`mean_motion`] | `n = sqrt(μ / a³)` |
//! | [`orbital_period`] | `T = 2π·sqrt(a³ / μ)` |
//! | [`time_of_flight_hohmann`] | `TOF = π·sqrt(a³ / μ)` (half period) |
//! | [`eccentricity_from_apsides`] | `e = (ra − rp) / (ra + rp)` |
//! | [`semi_major_axis_from_apsides`] | `a = (ra + rb) / 2` |
//! | [`orbit_radius`] | `r = a(1 − e²) / (1 + e·cos θ)` |
//! | [`transfer_eccentricity`] | `e = (rb − ra) / (ra·cos θa − rb·cos θb)` |
//! | [`vis_viva_speed`] | `v = sqrt(μ(2/r − 1/a))` |
//!
//! Functions whose result is undefined for some inputs return a
//! [`PropagationError`]; the purely geometric ones return plain `f64`.
use nalgebra::Vector2;
use std::f64::consts::PI;

use crate::{
    constants::{Kilometer, KmPerSecond, Radian, Second, DPI},
    prop_errors::PropagationError,
};

pub(crate) fn check_semi_major_axis(a: Kilometer) -> Result<(), PropagationError> {
    if a > 0.0 && a.is_finite() {
        Ok(())
    } else {
        Err(PropagationError::InvalidSemiMajorAxis(a))
    }
}

pub(crate) fn check_mu(mu: f64) -> Result<(), PropagationError> {
    if mu > 0.0 && mu.is_finite() {
        Ok(())
    } else {
        Err(PropagationError::InvalidGravitationalParameter(mu))
    }
}

/// Mean motion `n = sqrt(μ / a³)` in rad/s.
pub fn mean_motion(a: Kilometer, mu: f64) -> Result<f64, PropagationError> {
    check_semi_major_axis(a)?;
    check_mu(mu)?;
    Ok((mu / a.powi(3)).sqrt())
}

/// Full orbital period `2π·sqrt(a³/μ)` in seconds.
pub fn orbital_period(a: Kilometer, mu: f64) -> Result<Second, PropagationError> {
    check_semi_major_axis(a)?;
    check_mu(mu)?;
    Ok(DPI * (a.powi(3) / mu).sqrt())
}

/// Time of flight of a Hohmann transfer arc of semi-major axis `a`: half a
/// period, `π·sqrt(a³/μ)`, in seconds.
pub fn time_of_flight_hohmann(a: Kilometer, mu: f64) -> Result<Second, PropagationError> {
    check_semi_major_axis(a)?;
    check_mu(mu)?;
    Ok(PI * (a.powi(3) / mu).sqrt())
}

/// Eccentricity of the ellipse with apoapsis radius `ra` and periapsis radius `rp`.
///
/// Equal apsides describe a circle and return exactly `0.0`.
///
/// Errors
/// ------
/// * [`PropagationError::InvalidApsides`] if `rp ≤ 0`, `ra < rp`, or either is non-finite.
pub fn eccentricity_from_apsides(ra: Kilometer, rp: Kilometer) -> Result<f64, PropagationError> {
    if !(rp > 0.0 && ra >= rp && ra.is_finite()) {
        return Err(PropagationError::InvalidApsides { ra, rp });
    }

    if ra == rp {
        Ok(0.0)
    } else {
        Ok((ra - rp) / (ra + rp))
    }
}

/// Semi-major axis of the ellipse touching radii `ra` and `rb` on opposite apsides.
pub fn semi_major_axis_from_apsides(ra: Kilometer, rb: Kilometer) -> Kilometer {
    0.5 * (ra + rb)
}

/// Conic equation: distance from the focus at true anomaly `theta`.
pub fn orbit_radius(a: Kilometer, e: f64, theta: Radian) -> Kilometer {
    a * (1.0 - e.powi(2)) / (1.0 + e * theta.cos())
}

/// Eccentricity of a coaxial transfer arc joining radius `ra` at true anomaly
/// `theta_a` to radius `rb` at `theta_b`.
///
/// Errors
/// ------
/// * [`PropagationError::InvalidApsides`] when `ra·cos θa = rb·cos θb`: no
///   coaxial conic passes through both points.
pub fn transfer_eccentricity(
    ra: Kilometer,
    rb: Kilometer,
    theta_a: Radian,
    theta_b: Radian,
) -> Result<f64, PropagationError> {
    let denominator = ra * theta_a.cos() - rb * theta_b.cos();
    if denominator == 0.0 {
        return Err(PropagationError::InvalidApsides { ra, rp: rb });
    }
    Ok((rb - ra) / denominator)
}

/// Offset of the ellipse centre from the occupied focus along the apse line,
/// `a − a(1 + e) = −a·e`. Used to place an ellipse drawing around its focus.
pub fn focus_offset(a: Kilometer, e: f64) -> Kilometer {
    a - a * (1.0 + e)
}

/// Semi-minor axis `b = a·sqrt(1 − e²)`.
pub fn semi_minor_axis(a: Kilometer, e: f64) -> Kilometer {
    a * (1.0 - e.powi(2)).sqrt()
}

/// Position in the perifocal plane `(r·cos θ, r·sin θ)`, focus at the origin.
pub fn perifocal_position(a: Kilometer, e: f64, theta: Radian) -> Vector2<f64> {
    let r = orbit_radius(a, e, theta);
    Vector2::new(r * theta.cos(), r * theta.sin())
}

/// `true` if an orbit of periapsis radius `periapsis` dips below the surface
/// of a body of radius `body_radius`. A periapsis exactly on the surface
/// grazes without colliding.
pub fn orbit_intersects_body(periapsis: Kilometer, body_radius: Kilometer) -> bool {
    periapsis < body_radius
}

/// Vis-viva speed `sqrt(μ(2/r − 1/a))` at radius `r` on an orbit of semi-major axis `a`.
pub fn vis_viva_speed(r: Kilometer, a: Kilometer, mu: f64) -> Result<KmPerSecond, PropagationError> {
    check_semi_major_axis(a)?;
    check_semi_major_axis(r)?;
    check_mu(mu)?;
    Ok((mu * (2.0 / r - 1.0 / a)).sqrt())
}

/// Circular orbit speed `sqrt(μ/r)`.
pub fn circular_speed(r: Kilometer, mu: f64) -> Result<KmPerSecond, PropagationError> {
    vis_viva_speed(r, r, mu)
}

#[cfg(test)]
mod two_body_test {
    use super::*;
    use crate::constants::{EARTH_RADIUS, MU_EARTH, MU_MOON};
    use approx::assert_relative_eq;

    #[test]
    fn test_periods() {
        let a = 8371.0;
        let period = orbital_period(a, MU_EARTH).unwrap();
        let tof = time_of_flight_hohmann(a, MU_EARTH).unwrap();

        assert_relative_eq!(period, DPI * (a.powi(3) / MU_EARTH).sqrt());
        assert_relative_eq!(tof, 0.5 * period, max_relative = 1e-15);
        assert_relative_eq!(
            mean_motion(a, MU_EARTH).unwrap() * period,
            DPI,
            max_relative = 1e-14
        );
        // about 2 h 7 min
        assert!((7600.0..7700.0).contains(&period));
    }

    #[test]
    fn test_period_rejects_bad_inputs() {
        assert_eq!(
            orbital_period(-100.0, MU_EARTH),
            Err(PropagationError::InvalidSemiMajorAxis(-100.0))
        );
        assert_eq!(
            time_of_flight_hohmann(8371.0, 0.0),
            Err(PropagationError::InvalidGravitationalParameter(0.0))
        );
        assert!(mean_motion(f64::NAN, MU_MOON).is_err());
    }

    #[test]
    fn test_eccentricity_from_apsides() {
        assert_eq!(eccentricity_from_apsides(8371.0, 8371.0).unwrap(), 0.0);
        assert_eq!(eccentricity_from_apsides(1e-300, 1e-300).unwrap(), 0.0);

        let e = eccentricity_from_apsides(318_200.0, 8_371.0).unwrap();
        assert_relative_eq!(e, 0.948_733_965_967_584_4, epsilon = 1e-12);

        assert_eq!(
            eccentricity_from_apsides(100.0, 200.0),
            Err(PropagationError::InvalidApsides { ra: 100.0, rp: 200.0 })
        );
        assert!(eccentricity_from_apsides(100.0, 0.0).is_err());
    }

    #[test]
    fn test_orbit_radius() {
        // circle
        assert_relative_eq!(orbit_radius(6378.0, 0.0, 1.234), 6378.0);

        let (a, e) = (5137.0, 0.3);
        assert_relative_eq!(orbit_radius(a, e, 0.0), a * (1.0 - e), epsilon = 1e-9);
        assert_relative_eq!(orbit_radius(a, e, PI), a * (1.0 + e), epsilon = 1e-9);
    }

    #[test]
    fn test_transfer_eccentricity() {
        // Arc from periapsis (θ = 0) to apoapsis (θ = π) recovers the apsides formula
        let e = transfer_eccentricity(8_371.0, 318_200.0, 0.0, PI).unwrap();
        assert_relative_eq!(
            e,
            eccentricity_from_apsides(318_200.0, 8_371.0).unwrap(),
            epsilon = 1e-12
        );

        assert!(transfer_eccentricity(7000.0, 7000.0, 0.3, 0.3).is_err());
    }

    #[test]
    fn test_ellipse_geometry() {
        assert_relative_eq!(focus_offset(5137.0, 0.3), -1541.1, epsilon = 1e-9);
        assert_relative_eq!(semi_minor_axis(5137.0, 0.0), 5137.0);
        assert_relative_eq!(
            semi_minor_axis(5137.0, 0.3),
            5137.0 * 0.91_f64.sqrt(),
            epsilon = 1e-9
        );

        let p = perifocal_position(5137.0, 0.3, PI / 2.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 5137.0 * 0.91, epsilon = 1e-9);
    }

    #[test]
    fn test_orbit_intersects_body() {
        let earth = 6371.0;
        assert!(!orbit_intersects_body(7000.0, earth));
        assert!(orbit_intersects_body(6000.0, earth));
        assert!(!orbit_intersects_body(6371.0, earth));
        assert!(orbit_intersects_body(5137.0 * 0.7, EARTH_RADIUS));
    }

    #[test]
    fn test_speeds() {
        let v = circular_speed(6678.0, MU_EARTH).unwrap();
        assert_relative_eq!(v, 7.7258, epsilon = 1e-4);

        let (rp, ra) = (6678.0, 42_164.0);
        let a = semi_major_axis_from_apsides(ra, rp);
        let vp = vis_viva_speed(rp, a, MU_EARTH).unwrap();
        let va = vis_viva_speed(ra, a, MU_EARTH).unwrap();
        // angular momentum conservation between the apsides
        assert_relative_eq!(vp * rp, va * ra, max_relative = 1e-12);
    }
}
