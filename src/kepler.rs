//! # Kepler equation solver
//!
//! Solves Kepler's equation for closed (elliptical) orbits
//!
//! ```text
//! M = E − e·sin(E)
//! ```
//!
//! for the eccentric anomaly `E` by Newton–Raphson, then converts `E` into the
//! true anomaly `θ` with the half-angle form
//!
//! ```text
//! θ = 2·atan2( √(1+e)·sin(E/2), √(1−e)·cos(E/2) )
//! ```
//!
//! which stays well conditioned at periapsis (`E = 0`) and apoapsis (`E = π`).
//!
//! Both the mean anomaly given as input and the true anomaly returned are
//! normalized into `[0, 2π)` with [`principal_angle`].
//!
//! ## Failure modes
//!
//! - `e ∉ [0, 1)` (or NaN) → [`PropagationError::InvalidEccentricity`], before any iteration.
//! - Newton iteration exceeding [`SolverSettings::max_iterations`] →
//!   [`PropagationError::ConvergenceFailure`] carrying the last estimate, the last
//!   correction and the iteration count. A best-effort value is never returned.
//!
//! ## Example
//!
//! ```rust
//! use kepler_propagator::kepler::KeplerSolver;
//!
//! let solver = KeplerSolver::default();
//! let theta = solver.solve(std::f64::consts::FRAC_PI_2, 0.3).unwrap();
//! assert!(theta > std::f64::consts::FRAC_PI_2);
//! ```
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::{
    constants::{Radian, DPI},
    prop_errors::PropagationError,
};

/// Eccentricity above which Newton is seeded at `E₀ = π` instead of `E₀ = M`.
const HIGH_ECCENTRICITY_SEED: f64 = 0.8;

/// Return the principal value of an angle in radians, in `[0, 2π)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `2π`; that case
/// is folded back onto `0`.
pub fn principal_angle(a: f64) -> f64 {
    let angle = a.rem_euclid(DPI);
    if angle >= DPI {
        0.0
    } else {
        angle
    }
}

/// Return the principal difference `a − b` between two angles, in `[-π, π]`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let mut diff = principal_angle(a) - principal_angle(b);

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Reject eccentricities outside the closed-orbit range `[0, 1)`.
pub(crate) fn check_eccentricity(eccentricity: f64) -> Result<(), PropagationError> {
    if (0.0..1.0).contains(&eccentricity) {
        Ok(())
    } else {
        Err(PropagationError::InvalidEccentricity(eccentricity))
    }
}

/// Convergence controls of the Newton iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Stop once `|E_{n+1} − E_n|` falls below this value (radians).
    pub tolerance: f64,
    /// Maximum number of Newton corrections before giving up.
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            tolerance: 1e-10,
            max_iterations: 50,
        }
    }
}

/// Full output of one Kepler solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Normalized mean anomaly actually used, in `[0, 2π)`.
    pub mean_anomaly: Radian,
    /// Eccentric anomaly `E` satisfying `E − e·sin(E) = M`.
    pub eccentric_anomaly: Radian,
    /// True anomaly `θ`, in `[0, 2π)`.
    pub true_anomaly: Radian,
    /// Newton corrections applied beyond the seed. `0` means the seed already
    /// met the tolerance (always the case for a circular orbit).
    pub iterations: usize,
}

/// Newton–Raphson solver for Kepler's equation.
///
/// The solver is a plain value holding its [`SolverSettings`]; it has no
/// mutable state and can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeplerSolver {
    settings: SolverSettings,
}

impl KeplerSolver {
    pub fn new(settings: SolverSettings) -> Self {
        KeplerSolver { settings }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Solve Kepler's equation and return the true anomaly (radians, `[0, 2π)`).
    ///
    /// Arguments
    /// ---------
    /// * `mean_anomaly` – Mean anomaly `M` in radians, any real value (normalized mod 2π).
    /// * `eccentricity` – Eccentricity `e`, must satisfy `0 ≤ e < 1`.
    ///
    /// Return
    /// ------
    /// * The true anomaly `θ`, or a [`PropagationError`] if `e` is out of range
    ///   or the iteration does not converge.
    pub fn solve(&self, mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, PropagationError> {
        self.solve_detailed(mean_anomaly, eccentricity)
            .map(|solution| solution.true_anomaly)
    }

    /// Same as [`KeplerSolver::solve`] but also returns the eccentric anomaly
    /// and the number of Newton corrections.
    pub fn solve_detailed(
        &self,
        mean_anomaly: Radian,
        eccentricity: f64,
    ) -> Result<KeplerSolution, PropagationError> {
        check_eccentricity(eccentricity)?;

        let mean_anomaly = principal_angle(mean_anomaly);
        let (eccentric_anomaly, iterations) =
            self.solve_eccentric_anomaly(mean_anomaly, eccentricity)?;

        Ok(KeplerSolution {
            mean_anomaly,
            eccentric_anomaly,
            true_anomaly: true_anomaly_from_eccentric(eccentric_anomaly, eccentricity),
            iterations,
        })
    }

    /// Newton iteration on `f(E) = E − e·sin(E) − M`, `f′(E) = 1 − e·cos(E)`.
    ///
    /// `mean_anomaly` is expected already normalized.
    fn solve_eccentric_anomaly(
        &self,
        mean_anomaly: Radian,
        eccentricity: f64,
    ) -> Result<(Radian, usize), PropagationError> {
        let f = |ecc_anom: f64| ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly;
        let df = |ecc_anom: f64| 1.0 - eccentricity * ecc_anom.cos();

        let mut ecc_anom = if eccentricity < HIGH_ECCENTRICITY_SEED {
            mean_anomaly
        } else {
            PI
        };
        let mut delta = f64::INFINITY;

        for iteration in 0..self.settings.max_iterations {
            delta = f(ecc_anom) / df(ecc_anom);
            ecc_anom -= delta;

            if delta.abs() < self.settings.tolerance {
                debug!(
                    "Kepler solve converged: M = {mean_anomaly}, e = {eccentricity}, E = {ecc_anom}, {iteration} corrections"
                );
                return Ok((ecc_anom, iteration));
            }
        }

        warn!(
            "Kepler solve did not converge: M = {mean_anomaly}, e = {eccentricity}, last E = {ecc_anom}, |ΔE| = {}",
            delta.abs()
        );
        Err(PropagationError::ConvergenceFailure {
            last_estimate: ecc_anom,
            delta: delta.abs(),
            iterations: self.settings.max_iterations,
        })
    }
}

/// Convert an eccentric anomaly into a true anomaly in `[0, 2π)` with the half-angle form.
///
/// For `e = 0` the two anomalies coincide and `E` is returned unchanged
/// (normalized), so the circular identity `θ = M` holds bit for bit.
pub fn true_anomaly_from_eccentric(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    if eccentricity == 0.0 {
        return principal_angle(eccentric_anomaly);
    }

    let half = 0.5 * eccentric_anomaly;
    let theta = 2.0
        * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos());

    principal_angle(theta)
}

/// Inverse of [`true_anomaly_from_eccentric`]: eccentric anomaly in `[0, 2π)` from a true anomaly.
pub fn eccentric_anomaly_from_true(true_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = 0.5 * true_anomaly;
    let ecc_anom = 2.0
        * ((1.0 - eccentricity).sqrt() * half.sin()).atan2((1.0 + eccentricity).sqrt() * half.cos());

    principal_angle(ecc_anom)
}

/// Mean anomaly in `[0, 2π)` reached at a given true anomaly (Kepler's equation evaluated forward).
pub fn mean_anomaly_from_true(true_anomaly: Radian, eccentricity: f64) -> Radian {
    let ecc_anom = eccentric_anomaly_from_true(true_anomaly, eccentricity);
    principal_angle(ecc_anom - eccentricity * ecc_anom.sin())
}

#[cfg(test)]
mod kepler_test {

    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn mean_anomaly_grid() -> impl Iterator<Item = f64> {
        (0..72).map(|i| i as f64 * DPI / 72.0)
    }

    #[test]
    fn test_principal_angle() {
        assert_eq!(principal_angle(0.0), 0.0);
        assert_eq!(principal_angle(DPI), 0.0);
        assert_relative_eq!(principal_angle(-PI / 2.0), 3.0 * PI / 2.0, epsilon = 1e-15);
        assert_relative_eq!(principal_angle(5.0 * PI), PI, epsilon = 1e-14);

        let tiny = principal_angle(-1e-18);
        assert!((0.0..DPI).contains(&tiny));
    }

    #[test]
    fn test_angle_diff() {
        assert_relative_eq!(angle_diff(0.1, DPI - 0.1), 0.2, epsilon = 1e-14);
        assert_relative_eq!(angle_diff(DPI - 0.1, 0.1), -0.2, epsilon = 1e-14);
        assert_eq!(angle_diff(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_residual_over_eccentricity_grid() {
        let solver = KeplerSolver::default();

        for step in 0..=19 {
            let ecc = step as f64 * 0.05;
            for mean_anomaly in mean_anomaly_grid() {
                let sol = solver.solve_detailed(mean_anomaly, ecc).unwrap();
                let residual =
                    sol.eccentric_anomaly - ecc * sol.eccentric_anomaly.sin() - sol.mean_anomaly;

                assert!(
                    residual.abs() < 1e-8,
                    "residual {residual} for M = {mean_anomaly}, e = {ecc}"
                );
                assert!(sol.iterations < solver.settings().max_iterations);
                assert!((0.0..DPI).contains(&sol.true_anomaly));
            }
        }
    }

    #[test]
    fn test_periapsis_maps_to_periapsis() {
        let solver = KeplerSolver::default();
        for ecc in [0.0, 0.1, 0.3, 0.5] {
            assert_eq!(solver.solve(0.0, ecc).unwrap(), 0.0);
        }
        // Seeded at π, Newton lands on E ≈ 1e-33 rather than exactly 0
        for ecc in [0.8, 0.95, 0.999] {
            let theta = solver.solve(0.0, ecc).unwrap();
            assert_abs_diff_eq!(angle_diff(theta, 0.0), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_apoapsis_maps_to_apoapsis() {
        let solver = KeplerSolver::default();
        for ecc in [0.0, 0.1, 0.3, 0.5, 0.8, 0.95] {
            let theta = solver.solve(PI, ecc).unwrap();
            assert_abs_diff_eq!(theta, PI, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_circular_identity() {
        let solver = KeplerSolver::default();

        for mean_anomaly in mean_anomaly_grid() {
            let sol = solver.solve_detailed(mean_anomaly, 0.0).unwrap();
            assert_eq!(sol.true_anomaly, mean_anomaly);
            assert_eq!(sol.eccentric_anomaly, mean_anomaly);
            assert_eq!(sol.iterations, 0);
        }
    }

    #[test]
    fn test_mean_anomaly_is_normalized() {
        let solver = KeplerSolver::default();

        let wrapped = solver.solve(1.0 + 4.0 * PI, 0.4).unwrap();
        let direct = solver.solve(1.0, 0.4).unwrap();
        assert_relative_eq!(wrapped, direct, epsilon = 1e-12);

        let negative = solver.solve_detailed(-1.0, 0.4).unwrap();
        assert_relative_eq!(negative.mean_anomaly, DPI - 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_eccentricity() {
        let solver = KeplerSolver::default();

        assert_eq!(
            solver.solve(1.0, 1.2),
            Err(PropagationError::InvalidEccentricity(1.2))
        );
        assert_eq!(
            solver.solve(1.0, 1.0),
            Err(PropagationError::InvalidEccentricity(1.0))
        );
        assert_eq!(
            solver.solve(1.0, -0.1),
            Err(PropagationError::InvalidEccentricity(-0.1))
        );

        let nan = solver.solve(1.0, f64::NAN).unwrap_err();
        assert!(nan.is_invalid_orbit());
    }

    #[test]
    fn test_convergence_failure_is_reported() {
        let solver = KeplerSolver::new(SolverSettings {
            tolerance: 1e-10,
            max_iterations: 1,
        });

        let err = solver.solve(0.5, 0.9).unwrap_err();
        match err {
            PropagationError::ConvergenceFailure {
                last_estimate,
                delta,
                iterations,
            } => {
                assert_eq!(iterations, 1);
                assert!(delta >= 1e-10);
                assert!(last_estimate.is_finite());
            }
            other => panic!("expected a convergence failure, got {other:?}"),
        }
    }

    #[test]
    fn test_known_value() {
        // Vallado, example 2-1: M = 235.4°, e = 0.4 → E = 220.512074767522°
        let solver = KeplerSolver::default();
        let sol = solver.solve_detailed(235.4_f64.to_radians(), 0.4).unwrap();

        assert_relative_eq!(
            sol.eccentric_anomaly.to_degrees(),
            220.512074767522,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_anomaly_conversions_are_consistent() {
        let solver = KeplerSolver::default();
        let ecc = 0.6;

        for mean_anomaly in mean_anomaly_grid() {
            let theta = solver.solve(mean_anomaly, ecc).unwrap();
            let back = mean_anomaly_from_true(theta, ecc);
            assert_abs_diff_eq!(angle_diff(back, mean_anomaly), 0.0, epsilon = 1e-9);
        }
    }
}
