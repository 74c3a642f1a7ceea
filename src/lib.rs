//! # kepler_propagator
//!
//! Analytic two-body propagation of elliptical orbits: solve Kepler's equation
//! for the true anomaly and sample it over a time window.
//!
//! - [`kepler`]: Newton–Raphson Kepler solver and anomaly conversions.
//! - [`propagator`]: time sampling and the true-anomaly series.
//! - [`two_body`]: closed-form conic relations (period, apsides, vis-viva).
//! - [`maneuver`]: Hohmann transfers and impulsive burn classification.
//! - [`scenario`]: propagation runs described as YAML or built from presets.
//!
//! ```rust
//! use kepler_propagator::scenario::Scenario;
//!
//! let outcome = Scenario::earth_moon_transfer().run().unwrap();
//! let arrival = outcome.series.last().unwrap();
//! assert!((arrival.true_anomaly - std::f64::consts::PI).abs() < 1e-6);
//! ```
pub mod constants;
pub mod kepler;
pub mod maneuver;
pub mod orbit_type;
pub mod prop_errors;
pub mod propagator;
pub mod scenario;
pub mod time;
pub mod two_body;
